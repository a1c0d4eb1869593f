use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm as ConfirmPrompt, Input};
use listing_client::{
    ClientError, Config, Confirm, HttpPropertyApi, ListingClient, Property, PropertyApi, PropertyId,
    RowAction, SubmitKind,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-client", version, about = "Manage property listings on a REST backend")]
struct Cli {
    /// Backend base URL (overrides LISTINGS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides LISTINGS_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every listing
    List,
    /// Print one listing fetched from the backend
    Show { id: PropertyId },
    /// Create a listing
    Add {
        #[arg(long)]
        address: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        size: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change fields of an existing listing
    Edit {
        id: PropertyId,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a listing
    Delete {
        id: PropertyId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive session
    Shell,
}

/// Confirmation backed by a terminal prompt; prompt failures count as "no"
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match ConfirmPrompt::new().with_prompt(prompt).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.base_url, cli.timeout)?;

    let api = HttpPropertyApi::with_timeout(&config.base_url, config.timeout)
        .context("Failed to create HTTP client")?;
    let mut client = ListingClient::new(api);

    match cli.command {
        Command::List => {
            client.load().await?;
            print!("{}", client.render());
            println!("{}", client.state().sync_status());
        }
        Command::Show { id } => {
            let property = client.show(id).await?;
            print_property(&property);
        }
        Command::Add {
            address,
            price,
            size,
            description,
        } => {
            let form = client.form_mut();
            form.address = address;
            form.price = price;
            form.size = size;
            form.description = description;

            let outcome = client.submit().await;
            finish_write(&client, outcome)?;
        }
        Command::Edit {
            id,
            address,
            price,
            size,
            description,
        } => {
            client.load().await?;
            if !client.begin_edit(id) {
                anyhow::bail!("No property with id {}", id);
            }

            let form = client.form_mut();
            if let Some(address) = address {
                form.address = address;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(size) = size {
                form.size = size;
            }
            if let Some(description) = description {
                form.description = description;
            }

            let outcome = client.submit().await;
            finish_write(&client, outcome)?;
        }
        Command::Delete { id, yes } => {
            client.load().await?;
            if client.state().find(id).is_none() {
                warn!("Property {} is not in the listing, deleting anyway", id);
            }
            let removed = if yes {
                client.remove(id, &mut |_: &str| true).await
            } else {
                client.remove(id, &mut TerminalConfirm).await
            };
            match removed {
                Ok(true) => print!("{}", client.render()),
                Ok(false) => println!("Delete cancelled"),
                Err(e) => return Err(report(&client, e)),
            }
        }
        Command::Shell => run_shell(&mut client).await?,
    }

    Ok(())
}

/// Print the refreshed table, then fail if the write itself did not go through
fn finish_write(
    client: &ListingClient<HttpPropertyApi>,
    outcome: Result<SubmitKind, ClientError>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(SubmitKind::Created(p)) => {
            println!("Created {}", describe(&p));
            print!("{}", client.render());
            Ok(())
        }
        Ok(SubmitKind::Updated(p)) => {
            println!("Updated {}", describe(&p));
            print!("{}", client.render());
            Ok(())
        }
        Err(e) => Err(report(client, e)),
    }
}

/// Show what the listing looks like after a failed operation and turn the
/// failure into the process error
fn report(client: &ListingClient<HttpPropertyApi>, err: ClientError) -> anyhow::Error {
    match &err {
        ClientError::Write(_) => {
            eprintln!("The change was NOT saved. Current listing:");
            eprint!("{}", client.render());
        }
        ClientError::Reload(_) => {
            eprintln!("The change was saved, but the listing could not be refreshed.");
        }
        ClientError::Form(_) | ClientError::Load(_) => {}
    }
    err.into()
}

fn describe(property: &Property) -> String {
    match property.id {
        Some(id) => format!("#{} {}", id, property.address),
        None => property.address.clone(),
    }
}

fn print_property(property: &Property) {
    println!("{}", describe(property));
    println!("   Price: {}", listing_client::view::format_price(property.price));
    println!("   Size: {}", listing_client::view::format_size(property.size));
    println!("   Description: {}", property.description);
}

const SHELL_HELP: &str = "\
Commands:
  list | reload     fetch and show the listing
  new               fill the form for a new property
  edit <id>         load a property into the form and save changes
  delete <id>       delete a property
  cancel            clear the form
  help              this text
  quit              leave";

async fn run_shell(client: &mut ListingClient<HttpPropertyApi>) -> anyhow::Result<()> {
    info!("🏠 Listing shell on {}", client.api().endpoint());
    println!("{}", SHELL_HELP);

    if let Err(e) = client.load().await {
        println!("{}", e);
    }
    print!("{}", client.render());

    loop {
        let line = Input::<String>::new()
            .with_prompt("listings")
            .allow_empty(true)
            .interact_text()?;
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let id = words.next().and_then(|w| w.parse::<PropertyId>().ok());

        match (command, id) {
            ("", _) => continue,
            ("quit" | "exit", _) => break,
            ("help", _) => println!("{}", SHELL_HELP),
            ("list" | "reload", _) => {
                if let Err(e) = client.load().await {
                    println!("{}", e);
                }
                print!("{}", client.render());
                println!("{}", client.state().sync_status());
            }
            ("cancel", _) => {
                client.cancel_edit();
                println!("Form cleared");
            }
            ("new", _) => {
                client.cancel_edit();
                prompt_form(client)?;
                let outcome = client.submit().await;
                shell_outcome(client, outcome);
            }
            ("edit", Some(id)) => {
                if !client.dispatch(RowAction::Edit(id), &mut TerminalConfirm).await? {
                    println!("No property {} in the listing", id);
                    continue;
                }
                prompt_form(client)?;
                let outcome = client.submit().await;
                shell_outcome(client, outcome);
            }
            ("delete", Some(id)) => {
                match client.dispatch(RowAction::Delete(id), &mut TerminalConfirm).await {
                    Ok(true) => print!("{}", client.render()),
                    Ok(false) => println!("Delete cancelled"),
                    Err(e) => shell_error(client, &e),
                }
            }
            ("edit" | "delete", None) => println!("Usage: {} <id>", command),
            _ => println!("Unknown command {:?}, try help", command),
        }
    }

    Ok(())
}

/// Ask for every form field, starting from what the form already holds
fn prompt_form(client: &mut ListingClient<HttpPropertyApi>) -> anyhow::Result<()> {
    let form = client.form_mut();
    form.address = ask("Address", &form.address)?;
    form.price = ask("Price", &form.price)?;
    form.size = ask("Size (sqft)", &form.size)?;
    form.description = ask("Description", &form.description)?;
    Ok(())
}

fn ask(label: &str, current: &str) -> anyhow::Result<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn shell_outcome(client: &ListingClient<HttpPropertyApi>, outcome: Result<SubmitKind, ClientError>) {
    match outcome {
        Ok(SubmitKind::Created(p)) => {
            println!("Created {}", describe(&p));
            print!("{}", client.render());
        }
        Ok(SubmitKind::Updated(p)) => {
            println!("Updated {}", describe(&p));
            print!("{}", client.render());
        }
        Err(e) => shell_error(client, &e),
    }
}

fn shell_error(client: &ListingClient<HttpPropertyApi>, err: &ClientError) {
    match err {
        ClientError::Write(e) => {
            println!("The change was NOT saved: {}", e);
            print!("{}", client.render());
        }
        ClientError::Reload(e) => println!("Saved, but the listing could not be refreshed: {}", e),
        ClientError::Form(e) => println!("{}", e),
        ClientError::Load(e) => println!("{}", e),
    }
}
