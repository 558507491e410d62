//! Sandbox-only endpoints that move objects through states which would
//! otherwise need real-world activity.

use crate::{Client, Result};

use super::{AccountStatement, AccountTransfer};

pub struct Simulations<'a> {
    client: &'a Client,
}

impl<'a> Simulations<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn account_transfers(&self) -> AccountTransferSimulations<'a> {
        AccountTransferSimulations {
            client: self.client,
        }
    }

    pub fn account_statements(&self) -> AccountStatementSimulations<'a> {
        AccountStatementSimulations {
            client: self.client,
        }
    }
}

pub struct AccountTransferSimulations<'a> {
    client: &'a Client,
}

impl<'a> AccountTransferSimulations<'a> {
    /// Completes a pending account transfer as if it had been approved and settled
    pub fn complete(&self, id: &str) -> Result<AccountTransfer> {
        let path = format!("/simulations/account_transfers/{id}/complete");
        self.client.post_empty(&path)
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct SimulateAccountStatementParams {
    pub account_id: String,
}

pub struct AccountStatementSimulations<'a> {
    client: &'a Client,
}

impl<'a> AccountStatementSimulations<'a> {
    /// Generates a statement for the account immediately instead of at the end of the month
    pub fn create(&self, params: &SimulateAccountStatementParams) -> Result<AccountStatement> {
        self.client.post("/simulations/account_statements", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{http::Method, testing::MockTransport, Nullable};
    use pretty_assertions::assert_eq;

    #[test]
    fn complete_an_account_transfer() {
        let mock =
            MockTransport::new().respond(200, super::super::account_transfers::tests::TRANSFER);
        let client = Client::with_transport(mock.clone());

        let transfer = client
            .simulations()
            .account_transfers()
            .complete("account_transfer_7k9qe1ysdgqztnt63l7n")
            .unwrap();
        assert!(transfer.id.is_value());

        let req = &mock.requests()[0];
        assert_eq!(req.method, Method::Post);
        assert_eq!(
            req.path,
            "/simulations/account_transfers/account_transfer_7k9qe1ysdgqztnt63l7n/complete"
        );
    }

    #[test]
    fn create_an_account_statement() {
        let mock = MockTransport::new().respond(
            200,
            r#"{"id":"account_statement_1","account_id":"account_1","ending_balance":null}"#,
        );
        let client = Client::with_transport(mock.clone());

        let statement = client
            .simulations()
            .account_statements()
            .create(&SimulateAccountStatementParams {
                account_id: "account_1".into(),
            })
            .unwrap();
        assert_eq!(statement.ending_balance, Nullable::Null);

        let req = &mock.requests()[0];
        assert_eq!(req.path, "/simulations/account_statements");
        assert_eq!(req.body.as_deref(), Some(r#"{"account_id":"account_1"}"#));
    }
}
