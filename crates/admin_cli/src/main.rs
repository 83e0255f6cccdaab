use std::{error::Error, fmt::Write as _, io::Write, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{DerivedViews, Engine, Ledger, SessionGate, Sha256Credential, StatementLine};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "ledgerdash_admin")]
#[command(about = "Admin utilities for Ledgerdash (reports, exports, session)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ledgerdash.db?mode=rwc"
    )]
    database_url: String,

    /// File holding the login flag.
    #[arg(long, env = "LEDGERDASH_SESSION", default_value = ".ledgerdash_session")]
    session_file: PathBuf,

    /// Dashboard account name.
    #[arg(long, env = "LEDGERDASH__AUTH__USERNAME")]
    username: Option<String>,

    /// SHA-256 hex digest of the dashboard password.
    #[arg(long, env = "LEDGERDASH__AUTH__PASSWORD_SHA256", hide_env_values = true)]
    password_sha256: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print totals, the monthly series, the company ranking and the working capital.
    Dashboard {
        /// Reference date (`YYYY-MM-DD`), today by default.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the combined statement, newest first.
    Statement {
        #[arg(long)]
        query: Option<String>,
    },
    /// Write the transaction report.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file, stdout when absent.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Prompt for a password and print its SHA-256 digest for `settings.toml`.
    HashPassword,
    Login,
    Logout,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn render_dashboard(views: &DerivedViews) -> String {
    let mut out = String::new();
    let totals = &views.totals;
    let _ = writeln!(out, "Income:    {}", totals.income);
    let _ = writeln!(out, "Expenses:  {}", totals.expenses);
    let _ = writeln!(out, "Balance:   {}", totals.balance);

    let _ = writeln!(out, "\nMonthly");
    for bucket in &views.monthly {
        let _ = writeln!(
            out,
            "  {}  income {}  expenses {}  receivables {}  payables {}",
            bucket.label,
            bucket.income_total,
            bucket.expense_total,
            bucket.receivable_total,
            bucket.payable_total
        );
    }

    for (title, rows) in [
        ("Top income", &views.ranking.top_income),
        ("Top expenses", &views.ranking.top_expenses),
    ] {
        let _ = writeln!(out, "\n{title}");
        if rows.is_empty() {
            let _ = writeln!(out, "  -");
        }
        for (idx, row) in rows.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}  income {}  expenses {}  balance {}",
                idx + 1,
                row.name,
                row.income_total,
                row.expense_total,
                row.balance
            );
        }
    }

    let wc = &views.working_capital;
    let _ = writeln!(out, "\nWorking capital");
    let _ = writeln!(out, "  Receivables (open):   {}", wc.total_receivables);
    let _ = writeln!(out, "  Payables (open):      {}", wc.total_payables);
    let _ = writeln!(out, "  Fixed expenses:       {}", wc.total_fixed_expenses);
    out
}

fn render_statement(lines: &[StatementLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let sign = match line.kind {
            engine::TransactionKind::Income => "+",
            engine::TransactionKind::Expense => "-",
        };
        let _ = writeln!(
            out,
            "{}  {}{}  {}  {}  {}",
            line.date.format("%d/%m/%Y"),
            sign,
            line.amount,
            line.category,
            line.company_name.as_deref().unwrap_or("-"),
            line.description.as_deref().unwrap_or("-")
        );
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let gate = SessionGate::new(
        Sha256Credential::new(
            cli.username.clone().unwrap_or_default(),
            cli.password_sha256.clone().unwrap_or_default(),
        ),
        &cli.session_file,
    );

    match cli.command {
        Command::HashPassword => {
            let password = prompt_password_twice()?;
            println!("{}", Sha256Credential::digest(&password));
            return Ok(());
        }
        Command::Login => {
            let Some(username) = cli.username.as_deref() else {
                eprintln!("no username configured (--username or LEDGERDASH__AUTH__USERNAME)");
                std::process::exit(2);
            };
            let password = prompt_password("Password: ")?;
            if gate.authenticate(username, &password)? {
                println!("logged in as {username}");
                return Ok(());
            }
            eprintln!("invalid credentials");
            std::process::exit(1);
        }
        Command::Logout => {
            gate.logout()?;
            println!("logged out");
            return Ok(());
        }
        _ => {}
    }

    if !gate.is_authenticated() {
        eprintln!("not logged in, run `ledgerdash_admin login` first");
        std::process::exit(1);
    }

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;
    let snapshot = engine.load_snapshot().await?;

    match cli.command {
        Command::Dashboard { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let mut ledger = Ledger::new(snapshot);
            print!("{}", render_dashboard(ledger.views(today)?));
        }
        Command::Statement { query } => {
            let mut lines = engine::statement(&snapshot);
            if let Some(query) = query.as_deref() {
                lines = engine::search_statement(&lines, query);
            }
            print!("{}", render_statement(&lines));
        }
        Command::Export { format, out } => {
            let totals = engine::totals(
                &snapshot.transactions,
                &snapshot.receivables,
                &snapshot.payables,
            )?;
            let bytes = match format {
                ExportFormat::Csv => engine::export::transactions_csv(&snapshot, &totals)?,
                ExportFormat::Json => engine::export::transactions_json(&snapshot, &totals)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, bytes)?;
                    println!("wrote {}", path.display());
                }
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
        Command::HashPassword | Command::Login | Command::Logout => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{MoneyCents, Snapshot, Transaction, TransactionKind};
    use uuid::Uuid;

    fn snapshot() -> Snapshot {
        Snapshot {
            transactions: vec![Transaction {
                id: Uuid::new_v4(),
                kind: TransactionKind::Expense,
                amount: MoneyCents::new(4_250),
                category: "Food".to_string(),
                description: Some("Lunch".to_string()),
                date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
                company_id: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn dashboard_lists_totals_and_empty_rankings() {
        let mut ledger = Ledger::new(snapshot());
        let views = ledger
            .views(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
            .unwrap();
        let text = render_dashboard(views);

        assert!(text.contains("Expenses:  R$ 42,50"));
        assert!(text.contains("Balance:   -R$ 42,50"));
        assert!(text.contains("03/2024"));
        assert!(text.contains("Top income\n  -"));
    }

    #[test]
    fn statement_lines_are_signed() {
        let lines = engine::statement(&snapshot());
        assert_eq!(
            render_statement(&lines),
            "08/03/2024  -R$ 42,50  Food  -  Lunch\n"
        );
    }

    #[test]
    fn cli_parses_export_flags() {
        let cli = Cli::try_parse_from([
            "ledgerdash_admin",
            "export",
            "--format",
            "json",
            "--out",
            "report.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Export {
                format: ExportFormat::Json,
                out: Some(_)
            }
        ));
    }
}
