use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{MoneyCents, Obligation, Snapshot, TransactionKind};

use super::search::{display_date, matches_term, normalize_term};

pub const AMOUNT_RECEIVED_CATEGORY: &str = "Amount Received";
pub const AMOUNT_PAID_CATEGORY: &str = "Amount Paid";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementSource {
    Transaction,
    Receivable,
    Payable,
}

/// One realized movement of money, whatever record it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub id: Uuid,
    pub source: StatementSource,
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
}

/// Transactions, received receivables and paid payables merged into a single
/// list, newest first.
///
/// Settled obligations are dated at their due date. Lines on the same date
/// keep the order transactions → receivables → payables, each in store
/// order.
pub fn statement(snapshot: &Snapshot) -> Vec<StatementLine> {
    let names = snapshot.company_names();
    let company_name =
        |id: Option<Uuid>| id.and_then(|id| names.get(&id).map(|name| name.to_string()));

    let mut lines: Vec<StatementLine> = snapshot
        .transactions
        .iter()
        .map(|tx| StatementLine {
            id: tx.id,
            source: StatementSource::Transaction,
            kind: tx.kind,
            amount: tx.amount,
            category: tx.category.clone(),
            description: tx.description.clone(),
            date: tx.date,
            company_id: tx.company_id,
            company_name: company_name(tx.company_id),
        })
        .collect();

    lines.extend(
        snapshot
            .receivables
            .iter()
            .filter(|r| r.is_settled())
            .map(|r| StatementLine {
                id: r.id,
                source: StatementSource::Receivable,
                kind: TransactionKind::Income,
                amount: r.amount,
                category: AMOUNT_RECEIVED_CATEGORY.to_string(),
                description: Some(r.description.clone()),
                date: r.due_date,
                company_id: r.company_id,
                company_name: company_name(r.company_id),
            }),
    );

    lines.extend(
        snapshot
            .payables
            .iter()
            .filter(|p| p.is_settled())
            .map(|p| StatementLine {
                id: p.id,
                source: StatementSource::Payable,
                kind: TransactionKind::Expense,
                amount: p.amount,
                category: AMOUNT_PAID_CATEGORY.to_string(),
                description: Some(p.description.clone()),
                date: p.due_date,
                company_id: p.company_id,
                company_name: company_name(p.company_id),
            }),
    );

    lines.sort_by(|a, b| b.date.cmp(&a.date));
    lines
}

/// Lines whose category, description, company, amount or date contain
/// `term`, ignoring case. A blank term keeps every line.
pub fn search_statement(lines: &[StatementLine], term: &str) -> Vec<StatementLine> {
    let Some(term) = normalize_term(term) else {
        return lines.to_vec();
    };
    lines
        .iter()
        .filter(|line| {
            matches_term(
                &term,
                [
                    Some(line.category.as_str()),
                    line.description.as_deref(),
                    line.company_name.as_deref(),
                    Some(line.amount.to_string().as_str()),
                    Some(display_date(line.date).as_str()),
                ],
            )
        })
        .cloned()
        .collect()
}
