/// Closed enumerations used on the Binance spot wire.
///
/// Each enum owns exactly one wire table (`as_str`). `Display`, `FromStr`
/// and serde are all derived from that table, so a wire string is spelled
/// in one place only.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BinanceError;

/// Implements `Display`, `FromStr`, `Serialize` and `Deserialize` on top of
/// an enum's `ALL` slice and `as_str` table.
macro_rules! wire_enum {
    ($name:ident, $label:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BinanceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| BinanceError::Parse(format!("Unknown {} '{}'", $label, s)))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

wire_enum!(Side, "side");

/// Spot order types accepted by `POST /api/v3/order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Limit,
    LimitMaker,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
}

impl OrderType {
    pub const ALL: [OrderType; 7] = [
        OrderType::Limit,
        OrderType::LimitMaker,
        OrderType::Market,
        OrderType::StopLoss,
        OrderType::StopLossLimit,
        OrderType::TakeProfit,
        OrderType::TakeProfitLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::LimitMaker => "LIMIT_MAKER",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
        }
    }

    /// Whether the venue requires a limit `price` for this type.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit
                | OrderType::LimitMaker
                | OrderType::StopLossLimit
                | OrderType::TakeProfitLimit
        )
    }

    /// Whether the venue requires a trigger `stopPrice` for this type.
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            OrderType::StopLoss
                | OrderType::StopLossLimit
                | OrderType::TakeProfit
                | OrderType::TakeProfitLimit
        )
    }

    /// How `timeInForce` is treated for this type.
    pub fn time_in_force_rule(&self) -> TimeInForceRule {
        match self {
            OrderType::Limit => TimeInForceRule::DefaultTo(TimeInForce::GoodTillCancelled),
            OrderType::StopLossLimit | OrderType::TakeProfitLimit => TimeInForceRule::Required,
            OrderType::LimitMaker
            | OrderType::Market
            | OrderType::StopLoss
            | OrderType::TakeProfit => TimeInForceRule::Rejected,
        }
    }
}

wire_enum!(OrderType, "order type");

/// Per-order-type handling of `timeInForce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForceRule {
    /// Optional; the given value is used when the caller supplies none.
    DefaultTo(TimeInForce),
    /// Must be supplied by the caller.
    Required,
    /// Must be absent; the venue rejects the order otherwise.
    Rejected,
}

/// How long an unfilled order stays on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    GoodTillCancelled,
    ImmediateOrCancel,
    FillOrKill,
}

impl TimeInForce {
    pub const ALL: [TimeInForce; 3] = [
        TimeInForce::GoodTillCancelled,
        TimeInForce::ImmediateOrCancel,
        TimeInForce::FillOrKill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GoodTillCancelled => "GTC",
            TimeInForce::ImmediateOrCancel => "IOC",
            TimeInForce::FillOrKill => "FOK",
        }
    }
}

wire_enum!(TimeInForce, "time in force");

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// Candlestick interval for `GET /api/v3/klines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KlineInterval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl KlineInterval {
    pub const ALL: [KlineInterval; 15] = [
        KlineInterval::OneMinute,
        KlineInterval::ThreeMinutes,
        KlineInterval::FiveMinutes,
        KlineInterval::FifteenMinutes,
        KlineInterval::ThirtyMinutes,
        KlineInterval::OneHour,
        KlineInterval::TwoHours,
        KlineInterval::FourHours,
        KlineInterval::SixHours,
        KlineInterval::EightHours,
        KlineInterval::TwelveHours,
        KlineInterval::OneDay,
        KlineInterval::ThreeDays,
        KlineInterval::OneWeek,
        KlineInterval::OneMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::OneMinute => "1m",
            KlineInterval::ThreeMinutes => "3m",
            KlineInterval::FiveMinutes => "5m",
            KlineInterval::FifteenMinutes => "15m",
            KlineInterval::ThirtyMinutes => "30m",
            KlineInterval::OneHour => "1h",
            KlineInterval::TwoHours => "2h",
            KlineInterval::FourHours => "4h",
            KlineInterval::SixHours => "6h",
            KlineInterval::EightHours => "8h",
            KlineInterval::TwelveHours => "12h",
            KlineInterval::OneDay => "1d",
            KlineInterval::ThreeDays => "3d",
            KlineInterval::OneWeek => "1w",
            KlineInterval::OneMonth => "1M",
        }
    }
}

wire_enum!(KlineInterval, "kline interval");

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// Deposit status filter for `GET /sapi/v1/capital/deposit/hisrec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositStatus {
    Pending,
    Success,
    CreditedCannotWithdraw,
    WrongDeposit,
    WaitingUserConfirm,
}

impl DepositStatus {
    pub const ALL: [DepositStatus; 5] = [
        DepositStatus::Pending,
        DepositStatus::Success,
        DepositStatus::CreditedCannotWithdraw,
        DepositStatus::WrongDeposit,
        DepositStatus::WaitingUserConfirm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "0",
            DepositStatus::Success => "1",
            DepositStatus::CreditedCannotWithdraw => "6",
            DepositStatus::WrongDeposit => "7",
            DepositStatus::WaitingUserConfirm => "8",
        }
    }

    /// Map the numeric status found in deposit records.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DepositStatus::Pending),
            1 => Some(DepositStatus::Success),
            6 => Some(DepositStatus::CreditedCannotWithdraw),
            7 => Some(DepositStatus::WrongDeposit),
            8 => Some(DepositStatus::WaitingUserConfirm),
            _ => None,
        }
    }
}

wire_enum!(DepositStatus, "deposit status");

/// Withdrawal status filter for `GET /sapi/v1/capital/withdraw/history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WithdrawalStatus {
    EmailSent,
    Cancelled,
    AwaitingApproval,
    Rejected,
    Processing,
    Failure,
    Completed,
}

impl WithdrawalStatus {
    pub const ALL: [WithdrawalStatus; 7] = [
        WithdrawalStatus::EmailSent,
        WithdrawalStatus::Cancelled,
        WithdrawalStatus::AwaitingApproval,
        WithdrawalStatus::Rejected,
        WithdrawalStatus::Processing,
        WithdrawalStatus::Failure,
        WithdrawalStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::EmailSent => "0",
            WithdrawalStatus::Cancelled => "1",
            WithdrawalStatus::AwaitingApproval => "2",
            WithdrawalStatus::Rejected => "3",
            WithdrawalStatus::Processing => "4",
            WithdrawalStatus::Failure => "5",
            WithdrawalStatus::Completed => "6",
        }
    }

    /// Map the numeric status found in withdrawal records.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WithdrawalStatus::EmailSent),
            1 => Some(WithdrawalStatus::Cancelled),
            2 => Some(WithdrawalStatus::AwaitingApproval),
            3 => Some(WithdrawalStatus::Rejected),
            4 => Some(WithdrawalStatus::Processing),
            5 => Some(WithdrawalStatus::Failure),
            6 => Some(WithdrawalStatus::Completed),
            _ => None,
        }
    }
}

wire_enum!(WithdrawalStatus, "withdrawal status");
