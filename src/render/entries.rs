use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::resources::{
    Account, AccountStatement, AccountTransfer, Currency, EventSubscription, Transaction,
};

use super::{Render, Style, Theme};

/// The handful of fields every record is printed with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub id: String,
    pub description: Option<String>,
    pub amount: Option<(i64, Option<Currency>)>,
    pub status: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

pub trait Summarize {
    fn summarize(&self) -> Entry;
}

impl Summarize for Account {
    fn summarize(&self) -> Entry {
        Entry {
            id: id_of(self.id.value()),
            description: self.name.value().cloned(),
            amount: None,
            status: self.status.value().map(|s| s.as_str().to_string()),
            timestamp: self.created_at.value().copied(),
        }
    }
}

impl Summarize for AccountStatement {
    fn summarize(&self) -> Entry {
        let description = match (
            self.statement_period_start.value(),
            self.statement_period_end.value(),
        ) {
            (Some(start), Some(end)) => Some(format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            )),
            _ => self.account_id.value().cloned(),
        };

        Entry {
            id: id_of(self.id.value()),
            description,
            amount: self
                .ending_balance
                .value()
                .map(|&balance| (balance, self.currency())),
            status: None,
            timestamp: self.created_at.value().copied(),
        }
    }
}

impl Summarize for AccountTransfer {
    fn summarize(&self) -> Entry {
        Entry {
            id: id_of(self.id.value()),
            description: self.description.value().cloned(),
            amount: self
                .amount
                .value()
                .map(|&amount| (amount, self.currency.value().cloned())),
            status: self.status.value().map(|s| s.as_str().to_string()),
            timestamp: self.created_at.value().copied(),
        }
    }
}

impl Summarize for Transaction {
    fn summarize(&self) -> Entry {
        Entry {
            id: id_of(self.id.value()),
            description: self.description.value().cloned(),
            amount: self
                .amount
                .value()
                .map(|&amount| (amount, self.currency.value().cloned())),
            status: self
                .source
                .value()
                .and_then(|source| source.category.value())
                .map(|category| category.as_str().to_string()),
            timestamp: self.created_at.value().copied(),
        }
    }
}

impl Summarize for EventSubscription {
    fn summarize(&self) -> Entry {
        Entry {
            id: id_of(self.id.value()),
            description: self.url.value().cloned(),
            amount: None,
            status: self.status.value().map(|s| s.as_str().to_string()),
            timestamp: self.created_at.value().copied(),
        }
    }
}

fn id_of(id: Option<&String>) -> String {
    id.cloned().unwrap_or_else(|| "<no id>".to_string())
}

/// Formats an amount in minor units, e.g. `-1234` in USD is `USD -12.34`.
///
/// Without a currency the scale is unknown, so the minor units are printed as is.
pub fn format_amount(amount: i64, currency: Option<&Currency>) -> String {
    let currency = match currency {
        Some(currency) => currency,
        None => return amount.to_string(),
    };

    let places = currency.minor_units();
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();

    let value = match places {
        0 => format!("{}{}", sign, abs),
        places => {
            let scale = 10u64.pow(places);
            format!(
                "{}{}.{:0width$}",
                sign,
                abs / scale,
                abs % scale,
                width = places as usize
            )
        }
    };

    format!("{} {}", currency.as_str(), value)
}

pub struct Entries<'a> {
    pub title: &'a str,
    pub entries: &'a [Entry],
}

impl<'a> Render for Entries<'a> {
    fn render(&self, writer: &mut dyn Write, style: &Style, theme: &Theme) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{left}{title}",
            title = theme.description.paint(self.title),
            left = theme.fringe.paint(style.top)
        )?;

        for (n, entry) in self.entries.iter().enumerate() {
            if n > 0 {
                writeln!(writer, "{}", theme.fringe.paint(style.entry_sep))?;
            }

            write!(
                writer,
                "{left}{id}",
                left = theme.fringe.paint(style.field),
                id = theme.id.paint(&entry.id)
            )?;
            if let Some(description) = &entry.description {
                write!(writer, " {}", theme.description.paint(description))?;
            }
            writeln!(writer)?;

            let mut details = vec![];
            if let Some((amount, currency)) = &entry.amount {
                details.push(
                    theme
                        .amount(*amount)
                        .paint(format_amount(*amount, currency.as_ref()))
                        .to_string(),
                );
            }
            if let Some(status) = &entry.status {
                details.push(theme.status.paint(status).to_string());
            }
            if let Some(timestamp) = entry.timestamp {
                details.push(
                    theme
                        .timestamp
                        .paint(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
                        .to_string(),
                );
            }

            let last = n + 1 == self.entries.len();
            let left = if last { style.end } else { style.field };
            writeln!(
                writer,
                "{left}{details}",
                left = theme.fringe.paint(left),
                details = details.join(", ")
            )?;
        }

        if self.entries.is_empty() {
            writeln!(writer, "{}nothing found", theme.fringe.paint(style.end))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn amounts() {
        assert_eq!(format_amount(1234, Some(&Currency::Usd)), "USD 12.34");
        assert_eq!(format_amount(-5, Some(&Currency::Eur)), "EUR -0.05");
        assert_eq!(format_amount(-1500, Some(&Currency::Jpy)), "JPY -1500");
        assert_eq!(format_amount(100, None), "100");
        assert_eq!(
            format_amount(i64::MIN, Some(&Currency::Usd)),
            "USD -92233720368547758.08"
        );
    }

    #[test]
    fn statement_balances_use_their_currency() {
        let statement: AccountStatement = crate::json::decode(
            r#"{"id":"account_statement_1","ending_balance":150000,"currency":"JPY"}"#,
        )
        .unwrap();
        let entry = statement.summarize();
        assert_eq!(entry.amount, Some((150000, Some(Currency::Jpy))));

        let (amount, currency) = entry.amount.unwrap();
        assert_eq!(format_amount(amount, currency.as_ref()), "JPY 150000");

        let statement: AccountStatement =
            crate::json::decode(r#"{"id":"account_statement_2","ending_balance":150000}"#).unwrap();
        let (amount, currency) = statement.summarize().amount.unwrap();
        assert_eq!(currency, None);
        assert_eq!(format_amount(amount, currency.as_ref()), "150000");
    }

    #[test]
    fn summarize_a_transaction() {
        let transaction: Transaction = crate::json::decode(
            r#"{
                "id": "transaction_1",
                "amount": -2500,
                "currency": "USD",
                "description": "Coffee",
                "created_at": "2020-01-31T23:59:59Z",
                "source": {"category": "card_settlement", "card_settlement": {}}
            }"#,
        )
        .unwrap();

        let entry = transaction.summarize();
        assert_eq!(entry.id, "transaction_1");
        assert_eq!(entry.description.as_deref(), Some("Coffee"));
        assert_eq!(entry.amount, Some((-2500, Some(Currency::Usd))));
        assert_eq!(entry.status.as_deref(), Some("card_settlement"));
    }

    #[test]
    fn summarize_a_transfer_status() {
        let transfer: AccountTransfer =
            crate::json::decode(r#"{"id":"account_transfer_1","status":"pending_approval"}"#)
                .unwrap();
        let entry = transfer.summarize();
        assert_eq!(entry.status.as_deref(), Some("pending_approval"));
        assert_eq!(entry.amount, None);
    }

    #[test]
    fn render_plain() {
        yansi::Paint::disable();

        let entries = [
            Entry {
                id: "account_1".into(),
                description: Some("Checking".into()),
                status: Some("open".into()),
                ..Entry::default()
            },
            Entry {
                id: "account_2".into(),
                amount: Some((-100, Some(Currency::Usd))),
                ..Entry::default()
            },
        ];

        let mut out = vec![];
        Entries {
            title: "accounts",
            entries: &entries,
        }
        .render(&mut out, &Style::BOX, &Theme::default())
        .unwrap();

        let expected = "\
┌── accounts
├ account_1 Checking
├ open
│
├ account_2
└ USD -1.00
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn render_nothing() {
        yansi::Paint::disable();

        let mut out = vec![];
        Entries {
            title: "transactions",
            entries: &[],
        }
        .render(&mut out, &Style::NONE, &Theme::default())
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "transactions\nnothing found\n");
    }
}
