use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Company, Obligation};

/// Lowercased, trimmed search term; `None` when blank.
pub(super) fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

pub(super) fn matches_term<'a, I>(term: &str, fields: I) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
}

/// `DD/MM/YYYY`, the dashboard date format.
pub(crate) fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Receivables or payables whose description, company name, amount or due
/// date contain `term`.
pub fn search_obligations<'a, O: Obligation>(
    records: &'a [O],
    companies: &[Company],
    term: &str,
) -> Vec<&'a O> {
    let Some(term) = normalize_term(term) else {
        return records.iter().collect();
    };
    let names: HashMap<Uuid, &str> = companies
        .iter()
        .map(|company| (company.id, company.name.as_str()))
        .collect();

    records
        .iter()
        .filter(|record| {
            let company = record.company_id().and_then(|id| names.get(&id).copied());
            matches_term(
                &term,
                [
                    Some(record.description()),
                    company,
                    Some(record.amount().to_string().as_str()),
                    Some(display_date(record.due_date()).as_str()),
                ],
            )
        })
        .collect()
}

/// Companies whose name, segment, location or email contain `term`.
pub fn search_companies<'a>(companies: &'a [Company], term: &str) -> Vec<&'a Company> {
    let Some(term) = normalize_term(term) else {
        return companies.iter().collect();
    };
    companies
        .iter()
        .filter(|company| {
            matches_term(
                &term,
                [
                    Some(company.name.as_str()),
                    Some(company.segment.as_str()),
                    Some(company.location.as_str()),
                    company.email.as_deref(),
                ],
            )
        })
        .collect()
}
