use anyhow::{Result, bail};
use attendance_client::{
    Config, Confirm, DashboardController, DashboardState, DashboardView, DeleteOutcome,
    DeletePrompt, HttpAttendanceRepository, SubmissionController,
    model::{
        attendance::{AttendanceStatus, RecordId},
        filter::FilterPatch,
    },
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_appender::rolling;

#[derive(Parser)]
#[command(name = "attendance", about = "Record and review employee attendance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show recorded attendance, optionally filtered
    List {
        /// Date prefix, e.g. 2024-01 or 2024-01-05
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "employee-id")]
        employee_id: Option<String>,
    },
    /// Record attendance for one employee
    Record {
        #[arg(long)]
        name: String,
        #[arg(long = "employee-id")]
        employee_id: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "Present")]
        status: AttendanceStatus,
    },
    /// Delete a record by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Asks on the terminal before deleting.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &DeletePrompt) -> bool {
        let mut stdout = tokio::io::stdout();
        let question = format!("{} [y/N] ", prompt.question());
        if stdout.write_all(question.as_bytes()).await.is_err() {
            return false;
        }
        let _ = stdout.flush().await;

        let mut answer = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn render(state: &DashboardState) {
    match state.view() {
        DashboardView::Loading => println!("Loading attendance records..."),
        DashboardView::Failed { message } => {
            println!("{}", message);
            println!("Run the command again to retry.");
        }
        DashboardView::Records { rows, .. } => {
            println!("{}", state.summary());
            if rows.is_empty() {
                println!("No records found");
                return;
            }
            println!(
                "{:<12} {:<24} {:<12} {:<12} {:<8}",
                "ID", "Employee Name", "Employee ID", "Date", "Status"
            );
            for record in rows {
                let date = record
                    .calendar_date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .or_else(|| record.date.clone())
                    .unwrap_or_default();
                println!(
                    "{:<12} {:<24} {:<12} {:<12} {:<8}",
                    record.id,
                    record.employee_name.as_deref().unwrap_or(""),
                    record.employee_id.as_deref().unwrap_or(""),
                    date,
                    record.status.map(|s| s.to_string()).unwrap_or_default()
                );
            }
        }
    }
    if let Some(notice) = state.notice() {
        println!("{}", notice.message);
    }
}

async fn delete<C: Confirm>(
    repository: HttpAttendanceRepository,
    confirm: C,
    id: RecordId,
) -> Result<()> {
    let dashboard = DashboardController::new(repository, confirm);
    dashboard.mount().await?;

    match dashboard.delete_record(&id).await? {
        DeleteOutcome::Deleted => {
            dashboard.with_state(|state| {
                if let Some(notice) = state.notice() {
                    println!("{}", notice.message);
                }
            });
        }
        DeleteOutcome::Cancelled => println!("Nothing deleted."),
        DeleteOutcome::Declined { message } => bail!(message),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendance.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(api_url = %config.api_url, "Attendance client starting");

    let repository = HttpAttendanceRepository::new(&config)?;

    match cli.command {
        Command::List {
            date,
            name,
            employee_id,
        } => {
            let dashboard = DashboardController::new(repository, |_: &DeletePrompt| false);
            dashboard.set_filter(FilterPatch {
                date,
                employee_name: name,
                employee_id,
            });
            dashboard.attach(render);
            let result = dashboard.mount().await;
            dashboard.detach();
            result?;
        }
        Command::Record {
            name,
            employee_id,
            date,
            status,
        } => {
            let mut form = SubmissionController::new(repository)
                .on_recorded(|| info!("New attendance recorded, dashboard is stale"));
            let draft = form.draft_mut();
            draft.employee_name = name;
            draft.employee_id = employee_id;
            draft.status = status;
            if let Some(date) = date {
                draft.date = date;
            }

            let recorded = form.submit().await?;
            println!(
                "{}",
                recorded.message.as_deref().unwrap_or("Attendance recorded")
            );
        }
        Command::Delete { id, yes } => {
            let id = RecordId::from(id);
            if yes {
                delete(repository, |_: &DeletePrompt| true, id).await?;
            } else {
                delete(repository, TerminalConfirm, id).await?;
            }
        }
    }

    Ok(())
}
