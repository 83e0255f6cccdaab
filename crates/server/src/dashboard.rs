//! Dashboard API endpoint

use api_types::dashboard::{
    CompanyRanking, CompanyTotals, Dashboard, DashboardQuery, MonthlyBucket, Totals,
    WorkingCapital,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;

use crate::{ServerError, server::ServerState};

fn map_company_totals(row: &engine::CompanyTotals) -> CompanyTotals {
    CompanyTotals {
        company_id: row.company_id,
        name: row.name.clone(),
        income_minor: row.income_total.cents(),
        expense_minor: row.expense_total.cents(),
        balance_minor: row.balance.cents(),
    }
}

fn map_views(views: &engine::DerivedViews) -> Dashboard {
    Dashboard {
        totals: Totals {
            income_minor: views.totals.income.cents(),
            expenses_minor: views.totals.expenses.cents(),
            balance_minor: views.totals.balance.cents(),
        },
        monthly: views
            .monthly
            .iter()
            .map(|bucket| MonthlyBucket {
                label: bucket.label.clone(),
                year: bucket.year,
                month: bucket.month,
                income_minor: bucket.income_total.cents(),
                expense_minor: bucket.expense_total.cents(),
                receivable_minor: bucket.receivable_total.cents(),
                payable_minor: bucket.payable_total.cents(),
            })
            .collect(),
        ranking: CompanyRanking {
            top_income: views
                .ranking
                .top_income
                .iter()
                .map(map_company_totals)
                .collect(),
            top_expenses: views
                .ranking
                .top_expenses
                .iter()
                .map(map_company_totals)
                .collect(),
        },
        working_capital: WorkingCapital {
            total_income_minor: views.working_capital.total_income.cents(),
            total_expenses_minor: views.working_capital.total_expenses.cents(),
            total_receivables_minor: views.working_capital.total_receivables.cents(),
            total_payables_minor: views.working_capital.total_payables.cents(),
            total_fixed_expenses_minor: views.working_capital.total_fixed_expenses.cents(),
        },
    }
}

/// Every derived view. `today` defaults to the server's local date.
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, ServerError> {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let mut ledger = state.ledger.write().await;
    let views = ledger.views(today)?;
    Ok(Json(map_views(views)))
}
