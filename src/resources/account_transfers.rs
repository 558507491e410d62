use chrono::{DateTime, Utc};

use crate::{
    json::Extras,
    pagination::{AutoPager, Page},
    query::DateRange,
    Client, Nullable, Result,
};

use super::Currency;

pub type AccountTransfersPage = Page<AccountTransfer>;

/// A transfer between two accounts held at the bank
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountTransfer {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub amount: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub approval: Nullable<AccountTransferApproval>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub cancellation: Nullable<AccountTransferCancellation>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub currency: Nullable<Currency>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub destination_account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub destination_transaction_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub idempotency_key: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub network: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub pending_transaction_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub status: Nullable<AccountTransferStatus>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub transaction_id: Nullable<String>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountTransferApproval {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub approved_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub approved_by: Nullable<String>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountTransferCancellation {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub canceled_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub canceled_by: Nullable<String>,
}

api_enum! {
    pub enum AccountTransferStatus {
        PendingApproval => "pending_approval",
        Canceled => "canceled",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountTransferCreateParams {
    pub account_id: String,
    /// In the minor unit of the account's currency
    pub amount: i64,
    pub description: String,
    pub destination_account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_approval: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountTransferListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRange>,
}

pub struct AccountTransfers<'a> {
    client: &'a Client,
}

impl<'a> AccountTransfers<'a> {
    const PATH: &'static str = "/account_transfers";

    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &AccountTransferCreateParams) -> Result<AccountTransfer> {
        if params.amount <= 0 {
            return Err(crate::Error::Config(format!(
                "invalid amount: {}. transfers must move a positive amount",
                params.amount
            )));
        }
        self.client.post(Self::PATH, params)
    }

    pub fn retrieve(&self, id: &str) -> Result<AccountTransfer> {
        self.client.get(&super::path(Self::PATH, id))
    }

    pub fn list(&self, params: &AccountTransferListParams) -> Result<AccountTransfersPage> {
        super::check_limit(params.limit)?;
        self.client.get_page(Self::PATH, params)
    }

    pub fn list_auto_paging(
        &self,
        params: &AccountTransferListParams,
    ) -> Result<AutoPager<AccountTransfer>> {
        self.list(params).map(Page::auto_paging)
    }

    /// Approves a transfer created with `require_approval`
    pub fn approve(&self, id: &str) -> Result<AccountTransfer> {
        let path = format!("{}/approve", super::path(Self::PATH, id));
        self.client.post_empty(&path)
    }

    /// Cancels a transfer that is still pending approval
    pub fn cancel(&self, id: &str) -> Result<AccountTransfer> {
        let path = format!("{}/cancel", super::path(Self::PATH, id));
        self.client.post_empty(&path)
    }
}
