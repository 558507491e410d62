use chrono::{DateTime, Utc};

use crate::{
    json::Extras,
    pagination::{AutoPager, Page},
    query::DateRange,
    Client, Nullable, Result,
};

use super::Currency;

pub type TransactionsPage = Page<Transaction>;

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    /// Positive for credits, negative for debits, in the minor unit of `currency`
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub amount: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub currency: Nullable<Currency>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub route_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub route_type: Nullable<TransactionRouteType>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub source: Nullable<TransactionSource>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

api_enum! {
    pub enum TransactionRouteType {
        AccountNumber => "account_number",
        Card => "card",
        Lockbox => "lockbox",
    }
}

/// What caused a transaction.
///
/// Only the `category` is modelled, the category-specific detail object is kept in `extras`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransactionSource {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub category: Nullable<TransactionSourceCategory>,
}

impl TransactionSource {
    /// The detail object for this source's category, e.g. `source.card_settlement`
    pub fn detail(&self) -> Option<&serde_json::Value> {
        let category = self.category.value()?;
        self.extras
            .get(category.as_str())
            .filter(|value| !value.is_null())
    }
}

api_enum! {
    pub enum TransactionSourceCategory {
        AccountTransferIntention => "account_transfer_intention",
        AchTransferIntention => "ach_transfer_intention",
        AchTransferRejection => "ach_transfer_rejection",
        AchTransferReturn => "ach_transfer_return",
        CardDisputeAcceptance => "card_dispute_acceptance",
        CardRefund => "card_refund",
        CardSettlement => "card_settlement",
        CardRevenuePayment => "card_revenue_payment",
        CheckDepositAcceptance => "check_deposit_acceptance",
        CheckDepositReturn => "check_deposit_return",
        CheckTransferDeposit => "check_transfer_deposit",
        FeePayment => "fee_payment",
        InboundAchTransfer => "inbound_ach_transfer",
        InboundAchTransferReturnIntention => "inbound_ach_transfer_return_intention",
        InboundRealTimePaymentsTransferConfirmation => "inbound_real_time_payments_transfer_confirmation",
        InboundWireTransfer => "inbound_wire_transfer",
        InterestPayment => "interest_payment",
        InternalSource => "internal_source",
        RealTimePaymentsTransferAcknowledgement => "real_time_payments_transfer_acknowledgement",
        SampleFunds => "sample_funds",
        WireTransferIntention => "wire_transfer_intention",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct TransactionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(rename = "category.in", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<TransactionSourceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRange>,
}

pub struct Transactions<'a> {
    client: &'a Client,
}

impl<'a> Transactions<'a> {
    const PATH: &'static str = "/transactions";

    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, id: &str) -> Result<Transaction> {
        self.client.get(&super::path(Self::PATH, id))
    }

    pub fn list(&self, params: &TransactionListParams) -> Result<TransactionsPage> {
        super::check_limit(params.limit)?;
        self.client.get_page(Self::PATH, params)
    }

    pub fn list_auto_paging(
        &self,
        params: &TransactionListParams,
    ) -> Result<AutoPager<Transaction>> {
        self.list(params).map(Page::auto_paging)
    }
}
