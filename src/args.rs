use anyhow::Context as _;
use chrono::{DateTime, Utc};

use crate::{query::DateRange, resources::AccountStatus, Environment, Style};

#[derive(Debug)]
pub struct Args {
    pub resource: Resource,
    pub action: Action,
    pub json: bool,
    pub all: bool,
    pub limit: Option<u32>,
    pub status: Option<AccountStatus>,
    pub account_id: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub environment: Option<Environment>,
    pub style: Style,
}

impl Args {
    pub fn parse() -> anyhow::Result<Self> {
        let mut args = pico_args::Arguments::from_env();

        if args.contains("-h") {
            Self::print_short_help();
            std::process::exit(0);
        }

        if args.contains("--help") {
            Self::print_long_help();
            std::process::exit(0);
        }

        if args.contains(["-v", "--version"]) {
            Self::print_version();
            std::process::exit(0);
        }

        if args.contains("--print-default-config") {
            println!("{}", crate::Config::default_formatted_toml());
            std::process::exit(0)
        }

        if args.contains("--make-default-config") {
            let path = crate::Config::make_default_config()?;
            println!("wrote the default configuration to {}", path.display());
            std::process::exit(0)
        }

        if args.contains("--print-config-path") {
            println!(
                "{}",
                crate::Config::get_config_path()
                    .with_context(|| "your system does not have a configuration directory")?
                    .to_string_lossy()
            );
            std::process::exit(0)
        }

        Self::from_arguments(args)
    }

    pub fn from_arguments(mut args: pico_args::Arguments) -> anyhow::Result<Self> {
        let json = args.contains(["-j", "--json"]);
        let all = args.contains(["-a", "--all"]);
        let sandbox = args.contains("--sandbox");

        let limit = args.opt_value_from_str(["-l", "--limit"])?;
        let status = args.opt_value_from_str("--status")?;
        let account_id = args.opt_value_from_str("--account-id")?;
        let created_after = args.opt_value_from_str("--created-after")?;
        let created_before = args.opt_value_from_str("--created-before")?;
        let style = args.opt_value_from_str("--style")?.unwrap_or_default();

        let mut free = args
            .finish()
            .into_iter()
            .map(|s| s.to_string_lossy().to_string());

        let resource: Resource = free
            .next()
            .with_context(|| "a resource must be provided")?
            .parse()?;

        let action = match free.next().as_deref() {
            Some("list") | None => Action::List,
            Some("get") => Action::Get(free.next().with_context(|| "'get' needs an id")?),
            Some(action) => anyhow::bail!(
                "invalid action: {}. supported actions: [list | get <id>]",
                action
            ),
        };

        if let Some(extra) = free.next() {
            anyhow::bail!("unexpected argument: {}", extra)
        }

        let filters = [
            ("--status", status.is_some()),
            ("--account-id", account_id.is_some()),
            ("--created-after", created_after.is_some()),
            ("--created-before", created_before.is_some()),
        ];
        for (flag, _) in filters.iter().filter(|(_, used)| *used) {
            if action != Action::List {
                anyhow::bail!("{} only applies when listing", flag)
            }
            if !resource.filters().contains(flag) {
                anyhow::bail!("{} cannot be filtered by {}", resource.as_str(), flag)
            }
        }

        Ok(Self {
            resource,
            action,
            json,
            all,
            limit,
            status,
            account_id,
            created_after,
            created_before,
            environment: sandbox.then_some(Environment::Sandbox),
            style,
        })
    }

    pub fn created_at(&self) -> Option<DateRange> {
        let range = DateRange {
            after: self.created_after,
            before: self.created_before,
            ..DateRange::default()
        };
        (!range.is_empty()).then_some(range)
    }

    fn print_short_help() {
        Self::print_version();
        println!();
        println!("{}", include_str!("../assets/short_help.txt"));
    }

    fn print_long_help() {
        Self::print_short_help();
        println!("{}", include_str!("../assets/long_help.txt"));
    }

    fn print_version() {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    Accounts,
    AccountStatements,
    AccountTransfers,
    Transactions,
    EventSubscriptions,
}

impl Resource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::AccountStatements => "account-statements",
            Self::AccountTransfers => "account-transfers",
            Self::Transactions => "transactions",
            Self::EventSubscriptions => "event-subscriptions",
        }
    }

    /// The filter flags that narrow down a listing of this resource
    pub const fn filters(self) -> &'static [&'static str] {
        match self {
            Self::Accounts => &["--status", "--created-after", "--created-before"],
            Self::AccountStatements | Self::AccountTransfers | Self::Transactions => {
                &["--account-id", "--created-after", "--created-before"]
            }
            Self::EventSubscriptions => &[],
        }
    }
}

impl std::str::FromStr for Resource {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "accounts" => Self::Accounts,
            "account-statements" | "statements" => Self::AccountStatements,
            "account-transfers" | "transfers" => Self::AccountTransfers,
            "transactions" => Self::Transactions,
            "event-subscriptions" | "subscriptions" => Self::EventSubscriptions,
            name => anyhow::bail!(
                "invalid resource: {}. supported resources: [accounts | account-statements | account-transfers | transactions | event-subscriptions]",
                name
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Get(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::from_arguments(pico_args::Arguments::from_vec(
            args.iter().map(Into::into).collect(),
        ))
    }

    #[test]
    fn list_with_filters() {
        let args = parse(&[
            "accounts",
            "list",
            "--limit",
            "5",
            "--status",
            "open",
            "--created-after",
            "2023-01-01T00:00:00Z",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.resource, Resource::Accounts);
        assert_eq!(args.action, Action::List);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.status, Some(AccountStatus::Open));
        assert!(args.json);
        assert!(!args.all);
        assert_eq!(
            args.created_at(),
            Some(DateRange::default().after(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()))
        );
    }

    #[test]
    fn get_needs_an_id() {
        let args = parse(&["transfers", "get", "account_transfer_1", "--sandbox"]).unwrap();
        assert_eq!(args.resource, Resource::AccountTransfers);
        assert_eq!(args.action, Action::Get("account_transfer_1".into()));
        assert_eq!(args.environment, Some(Environment::Sandbox));
        assert_eq!(args.style, Style::BOX);

        assert!(parse(&["transfers", "get"]).is_err());
    }

    #[test]
    fn defaults_to_listing() {
        let args = parse(&["transactions", "--style", "none"]).unwrap();
        assert_eq!(args.action, Action::List);
        assert_eq!(args.style, Style::NONE);
        assert_eq!(args.created_at(), None);
        assert_eq!(args.environment, None);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["cards"]).is_err());
        assert!(parse(&["accounts", "delete"]).is_err());
        assert!(parse(&["accounts", "list", "extra"]).is_err());
        assert!(parse(&["accounts", "--status", "frozen"]).is_err());
        assert!(parse(&["accounts", "--style", "round"]).is_err());
    }

    #[test]
    fn rejects_filters_a_resource_does_not_support() {
        let err = parse(&["transactions", "--status", "open"]).unwrap_err();
        assert_eq!(err.to_string(), "transactions cannot be filtered by --status");

        assert!(parse(&["accounts", "--account-id", "account_1"]).is_err());
        assert!(parse(&["subscriptions", "--account-id", "account_1"]).is_err());
        assert!(parse(&["subscriptions", "--created-after", "2023-01-01T00:00:00Z"]).is_err());

        let err = parse(&["accounts", "get", "account_1", "--status", "open"]).unwrap_err();
        assert_eq!(err.to_string(), "--status only applies when listing");

        let args = parse(&["statements", "--account-id", "account_1"]).unwrap();
        assert_eq!(args.account_id.as_deref(), Some("account_1"));
    }
}
