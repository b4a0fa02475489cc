//! Gateway endpoint selection.

use serde::Deserialize;

/// AIO checkout endpoint on the staging gateway.
pub const STAGE_AIO_CHECKOUT_URL: &str = "https://payment-stage.ecpay.com.tw/Cashier/AioCheckOut/V5";

/// AIO checkout endpoint on the production gateway.
pub const LIVE_AIO_CHECKOUT_URL: &str = "https://payment.ecpay.com.tw/Cashier/AioCheckOut/V5";

/// Which gateway environment orders are sent to. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    #[default]
    Test,
    Live,
}

impl GatewayMode {
    pub fn from_test_flag(test: bool) -> Self {
        if test {
            GatewayMode::Test
        } else {
            GatewayMode::Live
        }
    }

    pub fn is_test(&self) -> bool {
        *self == GatewayMode::Test
    }

    /// Form action URL for AIO checkout.
    pub fn aio_checkout_url(&self) -> &'static str {
        match self {
            GatewayMode::Test => STAGE_AIO_CHECKOUT_URL,
            GatewayMode::Live => LIVE_AIO_CHECKOUT_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_selects_stage_endpoint() {
        let mode = GatewayMode::from_test_flag(true);
        assert!(mode.is_test());
        assert_eq!(mode.aio_checkout_url(), STAGE_AIO_CHECKOUT_URL);
    }

    #[test]
    fn live_mode_selects_production_endpoint() {
        let mode = GatewayMode::from_test_flag(false);
        assert!(!mode.is_test());
        assert_eq!(mode.aio_checkout_url(), LIVE_AIO_CHECKOUT_URL);
    }

    #[test]
    fn default_mode_is_test() {
        assert_eq!(GatewayMode::default(), GatewayMode::Test);
    }
}
