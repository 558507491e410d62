use std::io::Write;

use ledger_sdk::{resources::*, *};

fn try_enable_colors() {
    if std::env::var("NO_COLOR").is_ok() || (cfg!(windows) && !yansi::Paint::enable_windows_ascii())
    {
        yansi::Paint::disable();
    } else {
        yansi::Paint::enable();
    }
}

fn collect<T>(page: Page<T>, all: bool) -> ledger_sdk::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned + Clone,
{
    if !all {
        return Ok(page.into_items());
    }
    page.auto_paging().collect()
}

fn show<T>(args: &Args, theme: &Theme, title: &str, records: &[T]) -> anyhow::Result<()>
where
    T: Summarize + serde::Serialize,
{
    let out = std::io::stdout();
    let mut out = out.lock();

    if args.json {
        let value = match (&args.action, records) {
            (Action::Get(..), [record]) => ledger_sdk::json::to_value(record)?,
            _ => ledger_sdk::json::to_value(records)?,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    try_enable_colors();
    let entries = records.iter().map(Summarize::summarize).collect::<Vec<_>>();
    Entries {
        title,
        entries: &entries,
    }
    .render(&mut out, &args.style, theme)
}

fn run(args: &Args, client: &Client, theme: &Theme) -> anyhow::Result<()> {
    let created_at = args.created_at();

    match (args.resource, &args.action) {
        (Resource::Accounts, Action::Get(id)) => {
            show(args, theme, "account", &[client.accounts().retrieve(id)?])
        }
        (Resource::Accounts, Action::List) => {
            let page = client.accounts().list(&AccountListParams {
                limit: args.limit,
                status: args.status.clone(),
                created_at,
                ..AccountListParams::default()
            })?;
            show(args, theme, "accounts", &collect(page, args.all)?)
        }

        (Resource::AccountStatements, Action::Get(id)) => show(
            args,
            theme,
            "account statement",
            &[client.account_statements().retrieve(id)?],
        ),
        (Resource::AccountStatements, Action::List) => {
            let page = client
                .account_statements()
                .list(&AccountStatementListParams {
                    limit: args.limit,
                    account_id: args.account_id.clone(),
                    statement_period_start: created_at,
                    ..AccountStatementListParams::default()
                })?;
            show(args, theme, "account statements", &collect(page, args.all)?)
        }

        (Resource::AccountTransfers, Action::Get(id)) => show(
            args,
            theme,
            "account transfer",
            &[client.account_transfers().retrieve(id)?],
        ),
        (Resource::AccountTransfers, Action::List) => {
            let page = client.account_transfers().list(&AccountTransferListParams {
                limit: args.limit,
                account_id: args.account_id.clone(),
                created_at,
                ..AccountTransferListParams::default()
            })?;
            show(args, theme, "account transfers", &collect(page, args.all)?)
        }

        (Resource::Transactions, Action::Get(id)) => show(
            args,
            theme,
            "transaction",
            &[client.transactions().retrieve(id)?],
        ),
        (Resource::Transactions, Action::List) => {
            let page = client.transactions().list(&TransactionListParams {
                limit: args.limit,
                account_id: args.account_id.clone(),
                created_at,
                ..TransactionListParams::default()
            })?;
            show(args, theme, "transactions", &collect(page, args.all)?)
        }

        (Resource::EventSubscriptions, Action::Get(id)) => show(
            args,
            theme,
            "event subscription",
            &[client.event_subscriptions().retrieve(id)?],
        ),
        (Resource::EventSubscriptions, Action::List) => {
            let page = client
                .event_subscriptions()
                .list(&EventSubscriptionListParams {
                    limit: args.limit,
                    ..EventSubscriptionListParams::default()
                })?;
            show(args, theme, "event subscriptions", &collect(page, args.all)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    alto_logger::init_alt_term_logger()?;

    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!(
                "{err}\ntry running: {program_name} --help",
                err = err,
                program_name = env!("CARGO_BIN_NAME")
            );
            std::process::exit(1)
        }
    };

    let config = Config::load()?;

    let mut options = config.client_options()?;
    if let Some(environment) = args.environment {
        options = options.environment(environment);
    }
    log::debug!("using {:?}", options);

    let client = Client::new(options)?;

    if let Err(err) = run(&args, &client, &config.appearance.colors) {
        if let Some(ledger_sdk::Error::Api(api)) = err.downcast_ref::<ledger_sdk::Error>() {
            log::debug!("api error body: {:?}", api.body);
        }
        return Err(err);
    }
    Ok(())
}
