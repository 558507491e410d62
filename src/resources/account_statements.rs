use chrono::{DateTime, Utc};

use crate::{
    json::Extras,
    pagination::{AutoPager, Page},
    query::DateRange,
    Client, Nullable, Result,
};

pub type AccountStatementsPage = Page<AccountStatement>;

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountStatement {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub ending_balance: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub file_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub starting_balance: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub statement_period_start: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub statement_period_end: Nullable<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

impl AccountStatement {
    /// Net change over the statement period, if both balances are known
    pub fn net_change(&self) -> Option<i64> {
        let start = self.starting_balance.value()?;
        let end = self.ending_balance.value()?;
        end.checked_sub(*start)
    }

    /// Statements don't model a currency, but some carry one in `extras`
    pub fn currency(&self) -> Option<super::Currency> {
        self.extras
            .get("currency")
            .and_then(serde_json::Value::as_str)
            .map(super::Currency::from)
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountStatementListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_period_start: Option<DateRange>,
}

pub struct AccountStatements<'a> {
    client: &'a Client,
}

impl<'a> AccountStatements<'a> {
    const PATH: &'static str = "/account_statements";

    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, id: &str) -> Result<AccountStatement> {
        self.client.get(&super::path(Self::PATH, id))
    }

    pub fn list(&self, params: &AccountStatementListParams) -> Result<AccountStatementsPage> {
        super::check_limit(params.limit)?;
        self.client.get_page(Self::PATH, params)
    }

    pub fn list_auto_paging(
        &self,
        params: &AccountStatementListParams,
    ) -> Result<AutoPager<AccountStatement>> {
        self.list(params).map(Page::auto_paging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use chrono::TimeZone as _;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = r#"{
        "account_id": "account_in71c4amph0vgo2qllky",
        "created_at": "2020-01-31T23:59:59Z",
        "ending_balance": 100,
        "file_id": "file_makxrc67oh9l6sg7w9yc",
        "id": "account_statement_lkc03a4skm2k7f38vj15",
        "starting_balance": 0,
        "statement_period_end": "2020-01-31T23:59:59Z",
        "statement_period_start": "2020-01-31T23:59:59Z",
        "type": "account_statement"
    }"#;

    #[test]
    fn decodes_a_statement() {
        let statement: AccountStatement = crate::json::decode(STATEMENT).unwrap();
        assert_eq!(statement.ending_balance, Nullable::Value(100));
        assert_eq!(statement.net_change(), Some(100));
        assert!(statement.extras.is_empty());
        assert_eq!(statement.kind.as_deref(), Some("account_statement"));
    }

    #[test]
    fn net_change_needs_both_balances() {
        let statement = AccountStatement {
            ending_balance: Nullable::Value(5),
            starting_balance: Nullable::Null,
            ..AccountStatement::default()
        };
        assert_eq!(statement.net_change(), None);
    }

    #[test]
    fn list_filters_by_statement_period() {
        let mock = MockTransport::new().respond(
            200,
            &format!(r#"{{"data":[{}],"next_cursor":null}}"#, STATEMENT),
        );
        let client = Client::with_transport(mock.clone());

        let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let page = client
            .account_statements()
            .list(&AccountStatementListParams {
                account_id: Some("account_in71c4amph0vgo2qllky".into()),
                statement_period_start: Some(DateRange::default().after(at).before(at)),
                ..AccountStatementListParams::default()
            })
            .unwrap();
        assert_eq!(
            page.current().and_then(|s| s.id.as_deref()),
            Some("account_statement_lkc03a4skm2k7f38vj15")
        );

        let req = &mock.requests()[0];
        assert_eq!(req.path, "/account_statements");
        assert_eq!(
            req.query_value("account_id"),
            Some("account_in71c4amph0vgo2qllky")
        );
        assert_eq!(
            req.query_value("statement_period_start.after"),
            Some("2020-01-01T00:00:00Z")
        );
        assert_eq!(
            req.query_value("statement_period_start.before"),
            Some("2020-01-01T00:00:00Z")
        );
    }

    #[test]
    fn statement_round_trip_keeps_extras() {
        crate::testing::assert_round_trip::<AccountStatement>(STATEMENT);

        let statement: AccountStatement = crate::testing::assert_round_trip(
            r#"{
                "id": "account_statement_1",
                "ending_balance": 150000,
                "starting_balance": null,
                "currency": "JPY",
                "loan": {"balance": 0, "due_at": null}
            }"#,
        );
        assert_eq!(statement.currency(), Some(super::super::Currency::Jpy));
        assert_eq!(statement.extras["loan"]["balance"], 0);
    }
}
