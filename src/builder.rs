/// Order request normalization.
///
/// Every way of placing an order funnels through [`build_order`], which checks
/// the field combination each [`OrderType`] needs and applies the per-type
/// `timeInForce` policy. The seven `build_*_order` helpers only assemble an
/// [`OrderParams`] and delegate, so they cannot disagree with the general form.
///
/// Cancels and withdrawals get the same treatment through [`build_cancel`] and
/// [`build_withdraw`].
///
/// Nothing here performs I/O.
use log::debug;
use rust_decimal::Decimal;

use crate::enums::{OrderType, Side, TimeInForce, TimeInForceRule};
use crate::errors::{OrderField, ValidationError};
use crate::models::{CancelRequest, OrderRef, WithdrawRequest};

/// An order as the caller describes it, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderParams {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    pub client_order_id: Option<String>,
}

impl OrderParams {
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            client_order_id: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }
}

/// A validated, immutable order ready for dispatch.
///
/// Only the builder functions in this module can produce one, so holding a
/// `TradeRequest` means the field combination is acceptable for its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeRequest {
    symbol: String,
    side: Side,
    order_type: OrderType,
    quantity: Decimal,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
    client_order_id: Option<String>,
}

impl TradeRequest {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn stop_price(&self) -> Option<Decimal> {
        self.stop_price
    }

    pub fn time_in_force(&self) -> Option<TimeInForce> {
        self.time_in_force
    }

    pub fn client_order_id(&self) -> Option<&str> {
        self.client_order_id.as_deref()
    }

    /// Wire parameters for `POST /api/v3/order`, absent fields omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
        ];
        if let Some(tif) = self.time_in_force {
            params.push(("timeInForce", tif.as_str().to_string()));
        }
        params.push(("quantity", self.quantity.normalize().to_string()));
        if let Some(price) = self.price {
            params.push(("price", price.normalize().to_string()));
        }
        if let Some(stop_price) = self.stop_price {
            params.push(("stopPrice", stop_price.normalize().to_string()));
        }
        if let Some(id) = &self.client_order_id {
            params.push(("newClientOrderId", id.clone()));
        }
        params
    }
}

fn non_empty(field: OrderField, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

fn positive(field: OrderField, value: Decimal) -> Result<Decimal, ValidationError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

/// `Some(v)` when `required`, `None` when not; anything else is an error.
fn required_if(
    field: OrderField,
    order_type: OrderType,
    required: bool,
    value: Option<Decimal>,
) -> Result<Option<Decimal>, ValidationError> {
    match (required, value) {
        (true, Some(v)) => positive(field, v).map(Some),
        (true, None) => Err(ValidationError::Missing { field, order_type }),
        (false, Some(_)) => Err(ValidationError::NotAllowed { field, order_type }),
        (false, None) => Ok(None),
    }
}

fn resolve_time_in_force(
    order_type: OrderType,
    value: Option<TimeInForce>,
) -> Result<Option<TimeInForce>, ValidationError> {
    let field = OrderField::TimeInForce;
    match (order_type.time_in_force_rule(), value) {
        (TimeInForceRule::DefaultTo(default), v) => Ok(Some(v.unwrap_or(default))),
        (TimeInForceRule::Required, Some(v)) => Ok(Some(v)),
        (TimeInForceRule::Required, None) => Err(ValidationError::Missing { field, order_type }),
        (TimeInForceRule::Rejected, Some(_)) => {
            Err(ValidationError::NotAllowed { field, order_type })
        }
        (TimeInForceRule::Rejected, None) => Ok(None),
    }
}

/// Validate `params` and produce the canonical request for its order type.
pub fn build_order(params: OrderParams) -> Result<TradeRequest, ValidationError> {
    let order_type = params.order_type;
    let result = validate(params);
    if let Err(e) = &result {
        debug!(
            "builder.build_order rejected order_type={} field={} error={}",
            order_type,
            e.field(),
            e
        );
    }
    result
}

fn validate(params: OrderParams) -> Result<TradeRequest, ValidationError> {
    let OrderParams {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
        time_in_force,
        client_order_id,
    } = params;

    non_empty(OrderField::Symbol, &symbol)?;
    let quantity = positive(OrderField::Quantity, quantity)?;
    let price = required_if(
        OrderField::Price,
        order_type,
        order_type.requires_price(),
        price,
    )?;
    let stop_price = required_if(
        OrderField::StopPrice,
        order_type,
        order_type.requires_stop_price(),
        stop_price,
    )?;
    let time_in_force = resolve_time_in_force(order_type, time_in_force)?;

    Ok(TradeRequest {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
        time_in_force,
        client_order_id,
    })
}

/// Check a cancel request names a symbol and, when cancelling by client id,
/// a non-empty `origClientOrderId`.
pub fn build_cancel(request: CancelRequest) -> Result<CancelRequest, ValidationError> {
    let result = non_empty(OrderField::Symbol, request.symbol()).and_then(|()| {
        match request.order() {
            OrderRef::ClientId(id) => non_empty(OrderField::OrigClientOrderId, id),
            OrderRef::Id(_) => Ok(()),
        }
    });
    match result {
        Ok(()) => Ok(request),
        Err(e) => {
            debug!("builder.build_cancel rejected field={} error={}", e.field(), e);
            Err(e)
        }
    }
}

/// Check a withdrawal names an asset and an address and moves a positive
/// amount. The optional tag and name are passed through untouched.
pub fn build_withdraw(request: WithdrawRequest) -> Result<WithdrawRequest, ValidationError> {
    let result = non_empty(OrderField::Asset, &request.asset)
        .and_then(|()| non_empty(OrderField::Address, &request.address))
        .and_then(|()| positive(OrderField::Amount, request.amount));
    match result {
        Ok(_) => Ok(request),
        Err(e) => {
            debug!("builder.build_withdraw rejected field={} error={}", e.field(), e);
            Err(e)
        }
    }
}

/// LIMIT order; `timeInForce` defaults to GTC.
pub fn build_limit_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    price: Decimal,
    time_in_force: Option<TimeInForce>,
) -> Result<TradeRequest, ValidationError> {
    let mut params = OrderParams::new(symbol, side, OrderType::Limit, quantity).with_price(price);
    params.time_in_force = time_in_force;
    build_order(params)
}

/// LIMIT_MAKER order; never carries `timeInForce`.
pub fn build_limit_maker_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    price: Decimal,
) -> Result<TradeRequest, ValidationError> {
    build_order(OrderParams::new(symbol, side, OrderType::LimitMaker, quantity).with_price(price))
}

/// MARKET order.
pub fn build_market_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
) -> Result<TradeRequest, ValidationError> {
    build_order(OrderParams::new(symbol, side, OrderType::Market, quantity))
}

/// STOP_LOSS order, triggered at `stop_price`.
pub fn build_stop_loss_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    stop_price: Decimal,
) -> Result<TradeRequest, ValidationError> {
    build_order(
        OrderParams::new(symbol, side, OrderType::StopLoss, quantity).with_stop_price(stop_price),
    )
}

/// STOP_LOSS_LIMIT order.
pub fn build_stop_loss_limit_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    price: Decimal,
    stop_price: Decimal,
    time_in_force: TimeInForce,
) -> Result<TradeRequest, ValidationError> {
    build_order(
        OrderParams::new(symbol, side, OrderType::StopLossLimit, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
            .with_time_in_force(time_in_force),
    )
}

/// TAKE_PROFIT order, triggered at `stop_price`.
pub fn build_take_profit_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    stop_price: Decimal,
) -> Result<TradeRequest, ValidationError> {
    build_order(
        OrderParams::new(symbol, side, OrderType::TakeProfit, quantity)
            .with_stop_price(stop_price),
    )
}

/// TAKE_PROFIT_LIMIT order.
pub fn build_take_profit_limit_order(
    symbol: &str,
    side: Side,
    quantity: Decimal,
    price: Decimal,
    stop_price: Decimal,
    time_in_force: TimeInForce,
) -> Result<TradeRequest, ValidationError> {
    build_order(
        OrderParams::new(symbol, side, OrderType::TakeProfitLimit, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
            .with_time_in_force(time_in_force),
    )
}
