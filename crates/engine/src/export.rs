//! Transaction report in CSV and JSON.
//!
//! Both formats carry the same rows (date, type, category, company, amount,
//! description) followed by the dashboard totals.

use serde::Serialize;

use crate::{ResultEngine, Snapshot, Totals, TransactionKind, views::display_date};

#[derive(Debug, Serialize)]
struct ReportRow {
    date: String,
    #[serde(rename = "type")]
    kind: &'static str,
    category: String,
    company: String,
    amount: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct ReportTotals {
    income: String,
    expenses: String,
    balance: String,
}

#[derive(Debug, Serialize)]
struct Report {
    transactions: Vec<ReportRow>,
    totals: ReportTotals,
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

fn rows(snapshot: &Snapshot) -> Vec<ReportRow> {
    let names = snapshot.company_names();
    snapshot
        .transactions
        .iter()
        .map(|tx| ReportRow {
            date: display_date(tx.date),
            kind: kind_label(tx.kind),
            category: tx.category.clone(),
            company: tx
                .company_id
                .and_then(|id| names.get(&id).map(|name| name.to_string()))
                .unwrap_or_else(|| "-".to_string()),
            amount: tx.amount.to_string(),
            description: tx.description.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Transactions in store order, then `Total income`, `Total expenses` and
/// `Balance` rows.
pub fn transactions_csv(snapshot: &Snapshot, totals: &Totals) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows(snapshot) {
        writer.serialize(row)?;
    }

    writer.write_record(["", "", "", "", "", ""])?;
    for (label, amount) in [
        ("Total income", totals.income),
        ("Total expenses", totals.expenses),
        ("Balance", totals.balance),
    ] {
        writer.write_record([label, "", "", "", amount.to_string().as_str(), ""])?;
    }

    writer
        .into_inner()
        .map_err(|err| crate::EngineError::Export(err.to_string()))
}

pub fn transactions_json(snapshot: &Snapshot, totals: &Totals) -> ResultEngine<Vec<u8>> {
    let report = Report {
        transactions: rows(snapshot),
        totals: ReportTotals {
            income: totals.income.to_string(),
            expenses: totals.expenses.to_string(),
            balance: totals.balance.to_string(),
        },
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MoneyCents,
        views::{
            fixtures::{company, expense, income},
            totals,
        },
    };

    fn snapshot() -> Snapshot {
        let acme = company("Acme");
        let mut sale = income(150_000);
        sale.category = "Service Provision".to_string();
        sale.company_id = Some(acme.id);
        sale.description = Some("Website".to_string());
        Snapshot {
            companies: vec![acme],
            transactions: vec![sale, expense(2_000)],
            ..Default::default()
        }
    }

    #[test]
    fn csv_has_header_rows_and_totals() {
        let snapshot = snapshot();
        let totals = totals(&snapshot.transactions, &[], &[]).unwrap();
        let csv = String::from_utf8(transactions_csv(&snapshot, &totals).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "date,type,category,company,amount,description");
        assert_eq!(
            lines[1],
            "15/01/2024,Income,Service Provision,Acme,\"R$ 1.500,00\",Website"
        );
        assert_eq!(lines[2], "15/01/2024,Expense,Other,-,\"R$ 20,00\",-");
        assert_eq!(lines.last().copied(), Some("Balance,,,,\"R$ 1.480,00\","));
    }

    #[test]
    fn json_report_carries_totals() {
        let snapshot = snapshot();
        let totals = Totals {
            income: MoneyCents::new(150_000),
            expenses: MoneyCents::new(2_000),
            balance: MoneyCents::new(148_000),
        };
        let json: serde_json::Value =
            serde_json::from_slice(&transactions_json(&snapshot, &totals).unwrap()).unwrap();

        assert_eq!(json["transactions"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["transactions"][0]["type"], "Income");
        assert_eq!(json["totals"]["balance"], "R$ 1.480,00");
    }
}
