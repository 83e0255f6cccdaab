//! Initial schema.
//!
//! - `companies`: client companies
//! - `transactions`: realized income and expenses
//! - `receivables`: amounts expected from clients
//! - `payables`: amounts owed to suppliers
//! - `fixed_expenses`: recurring monthly costs
//!
//! Amounts are decimal text (`"1234.56"`) and dates are `YYYY-MM-DD` text.
//! `company_id` columns are plain references without a foreign key: deleting
//! a company leaves the records that mention it alone.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    Segment,
    Location,
    Email,
    Phone,
    Notes,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Kind,
    Amount,
    Category,
    Description,
    Date,
    CompanyId,
}

#[derive(Iden)]
enum Receivables {
    Table,
    Id,
    Description,
    Amount,
    DueDate,
    CompanyId,
    Status,
    Notes,
}

#[derive(Iden)]
enum Payables {
    Table,
    Id,
    Description,
    Amount,
    DueDate,
    CompanyId,
    Status,
    Notes,
}

#[derive(Iden)]
enum FixedExpenses {
    Table,
    Id,
    Description,
    Amount,
    DueDay,
    Category,
    IsActive,
    Notes,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Companies
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Segment).string().not_null())
                    .col(ColumnDef::new(Companies::Location).string().not_null())
                    .col(ColumnDef::new(Companies::Email).string())
                    .col(ColumnDef::new(Companies::Phone).string())
                    .col(ColumnDef::new(Companies::Notes).string())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Amount).string().not_null())
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(ColumnDef::new(Transactions::Description).string())
                    .col(ColumnDef::new(Transactions::Date).string().not_null())
                    .col(ColumnDef::new(Transactions::CompanyId).uuid())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-date")
                    .table(Transactions::Table)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Receivables
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Receivables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receivables::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Receivables::Description).string().not_null())
                    .col(ColumnDef::new(Receivables::Amount).string().not_null())
                    .col(ColumnDef::new(Receivables::DueDate).string().not_null())
                    .col(ColumnDef::new(Receivables::CompanyId).uuid())
                    .col(
                        ColumnDef::new(Receivables::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Receivables::Notes).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-receivables-due_date")
                    .table(Receivables::Table)
                    .col(Receivables::DueDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Payables
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payables::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payables::Description).string().not_null())
                    .col(ColumnDef::new(Payables::Amount).string().not_null())
                    .col(ColumnDef::new(Payables::DueDate).string().not_null())
                    .col(ColumnDef::new(Payables::CompanyId).uuid())
                    .col(
                        ColumnDef::new(Payables::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Payables::Notes).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payables-due_date")
                    .table(Payables::Table)
                    .col(Payables::DueDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Fixed expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(FixedExpenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FixedExpenses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FixedExpenses::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FixedExpenses::Amount).string().not_null())
                    .col(ColumnDef::new(FixedExpenses::DueDay).integer().not_null())
                    .col(ColumnDef::new(FixedExpenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(FixedExpenses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(FixedExpenses::Notes).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FixedExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Receivables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        Ok(())
    }
}
