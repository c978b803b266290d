use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    client::{ClientError, ClientState, ExpenseClient},
    expense::{Category, ExpenseId},
    format_currency,
};

/// Record and review expenses stored by an expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The URL of the expense tracker server.
    #[arg(long, env = "EXPENSE_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every expense, newest first.
    List,

    /// Record a new expense.
    Add {
        /// What the money was spent on.
        #[arg(short, long)]
        description: String,

        /// How much was spent, e.g. 120.50.
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// The expense category.
        #[arg(short, long, default_value_t = Category::default().to_string())]
        category: String,
    },

    /// Change an existing expense. Fields that are not given keep their value.
    Edit {
        /// The ID of the expense to change.
        id: ExpenseId,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense.
    Delete {
        /// The ID of the expense to delete.
        id: ExpenseId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
                ),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(state) => {
            print_expenses(&state);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ClientState, ClientError> {
    let client = ExpenseClient::new(&args.base_url)?;
    let mut state = ClientState::new(client);
    state.refresh().await?;

    match args.command {
        Command::List => {}
        Command::Add {
            description,
            amount,
            category,
        } => {
            let form = state.form_mut();
            form.description = description;
            form.amount = amount;
            form.category = category;
            state.submit().await?;
        }
        Command::Edit {
            id,
            description,
            amount,
            category,
        } => {
            state.begin_edit(id)?;

            let form = state.form_mut();
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(category) = category {
                form.category = category;
            }
            state.submit().await?;
        }
        Command::Delete { id } => state.delete(id).await?,
    }

    Ok(state)
}

fn print_expenses(state: &ClientState) {
    if state.expenses().is_empty() {
        println!("No expenses yet");
    }

    for expense in state.expenses() {
        println!(
            "{:>5}  {}  {:<30}  {:<15}  {:>12}",
            expense.id,
            expense.created_at.date(),
            expense.description,
            expense.category,
            format_currency(expense.amount)
        );
    }

    println!();
    println!("Total: {}", format_currency(state.total()));
}
