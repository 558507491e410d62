/// Declares a string enum for a set of API values.
///
/// Values missing from the list decode into `Unknown` holding the raw string, so
/// records carrying values added to the API later still decode, and encode back unchanged.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $value:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)*
                    Self::Unknown(value) => value.as_str(),
                }
            }

            /// The variant for `value` if it's a known one
            pub fn known(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub const fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(..))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::known(value).unwrap_or_else(|| Self::Unknown(value.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, ser: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                ser.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(de: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <String as serde::Deserialize>::deserialize(de)?;
                Ok(match Self::known(&value) {
                    Some(known) => known,
                    None => Self::Unknown(value),
                })
            }
        }
    };
}

mod accounts;
pub use accounts::{
    Account, AccountBalanceParams, AccountBank, AccountCreateParams, AccountListParams,
    AccountStatus, AccountUpdateParams, Accounts, AccountsPage, BalanceLookup,
};

mod account_statements;
pub use account_statements::{
    AccountStatement, AccountStatementListParams, AccountStatements, AccountStatementsPage,
};

mod account_transfers;
pub use account_transfers::{
    AccountTransfer, AccountTransferApproval, AccountTransferCancellation,
    AccountTransferCreateParams, AccountTransferListParams, AccountTransferStatus,
    AccountTransfers, AccountTransfersPage,
};

mod transactions;
pub use transactions::{
    Transaction, TransactionListParams, TransactionRouteType, TransactionSource,
    TransactionSourceCategory, Transactions, TransactionsPage,
};

mod event_subscriptions;
pub use event_subscriptions::{
    EventSubscription, EventSubscriptionCreateParams, EventSubscriptionListParams,
    EventSubscriptionStatus, EventSubscriptionUpdateParams, EventSubscriptions,
    EventSubscriptionsPage,
};

mod simulations;
pub use simulations::{
    AccountStatementSimulations, AccountTransferSimulations, SimulateAccountStatementParams,
    Simulations,
};

use crate::{Error, Result};

/// The largest page size list endpoints accept
pub const MAX_LIMIT: u32 = 100;

api_enum! {
    pub enum Currency {
        Cad => "CAD",
        Chf => "CHF",
        Eur => "EUR",
        Gbp => "GBP",
        Jpy => "JPY",
        Usd => "USD",
    }
}

impl Currency {
    /// Decimal places between the minor and the major unit
    pub fn minor_units(&self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }
}

fn path(base: &str, id: &str) -> String {
    format!("{base}/{id}")
}

fn check_limit(limit: Option<u32>) -> Result<()> {
    match limit {
        Some(limit) if !(1..=MAX_LIMIT).contains(&limit) => Err(Error::Config(format!(
            "invalid limit: {limit}. it must be between 1 and {MAX_LIMIT}"
        ))),
        _ => Ok(()),
    }
}
