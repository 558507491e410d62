use chrono::{DateTime, Utc};

use crate::{
    json::Extras,
    pagination::{AutoPager, Page},
    query::DateRange,
    Client, Nullable, Result,
};

use super::Currency;

pub type AccountsPage = Page<Account>;

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub bank: Nullable<AccountBank>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub closed_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub currency: Nullable<Currency>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub entity_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub idempotency_key: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub informational_entity_id: Nullable<String>,
    /// Accrued but unpaid interest, as a decimal string in the account's currency
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub interest_accrued: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub interest_accrued_at: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub interest_rate: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub program_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub status: Nullable<AccountStatus>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

api_enum! {
    pub enum AccountBank {
        CoreBank => "core_bank",
        FirstInternetBank => "first_internet_bank",
        GrasshopperBank => "grasshopper_bank",
    }
}

api_enum! {
    pub enum AccountStatus {
        Open => "open",
        Closed => "closed",
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::known(s).ok_or_else(|| {
            crate::Error::Config(format!(
                "invalid account status: {s}. supported statuses: [open | closed]"
            ))
        })
    }
}

/// The balance of an account at a point in time
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BalanceLookup {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    /// In the minor unit of the account's currency
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub available_balance: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub current_balance: Nullable<i64>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountCreateParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informational_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountUpdateParams {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informational_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AccountBalanceParams {
    #[serde(
        with = "crate::query::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub at_time: Option<DateTime<Utc>>,
}

pub struct Accounts<'a> {
    client: &'a Client,
}

impl<'a> Accounts<'a> {
    const PATH: &'static str = "/accounts";

    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &AccountCreateParams) -> Result<Account> {
        self.client.post(Self::PATH, params)
    }

    pub fn retrieve(&self, id: &str) -> Result<Account> {
        self.client.get(&super::path(Self::PATH, id))
    }

    pub fn update(&self, id: &str, params: &AccountUpdateParams) -> Result<Account> {
        self.client.patch(&super::path(Self::PATH, id), params)
    }

    pub fn list(&self, params: &AccountListParams) -> Result<AccountsPage> {
        super::check_limit(params.limit)?;
        self.client.get_page(Self::PATH, params)
    }

    pub fn list_auto_paging(&self, params: &AccountListParams) -> Result<AutoPager<Account>> {
        self.list(params).map(Page::auto_paging)
    }

    pub fn balance(&self, id: &str, params: &AccountBalanceParams) -> Result<BalanceLookup> {
        let path = format!("{}/balance", super::path(Self::PATH, id));
        self.client.get_query(&path, params)
    }

    pub fn close(&self, id: &str) -> Result<Account> {
        let path = format!("{}/close", super::path(Self::PATH, id));
        self.client.post_empty(&path)
    }
}
