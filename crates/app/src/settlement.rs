//! Simulated card processing.

use std::time::Duration;

use iara::{
    checkout::{CardSettlement, SettlementError},
    orders::Order,
};
use tracing::debug;

/// Accepts every card payment after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct DelayedSettlement {
    delay: Duration,
}

impl DelayedSettlement {
    /// Settle after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl CardSettlement for DelayedSettlement {
    async fn settle(&self, order: &Order) -> Result<(), SettlementError> {
        debug!(order_id = %order.id, delay_ms = self.delay.as_millis(), "processing card payment");

        tokio::time::sleep(self.delay).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use iara::orders::{Customer, OrderId, PaymentMethod};
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn waits_for_the_delay() -> TestResult {
        let order = Order::new(
            OrderId::from("ORDER-1"),
            Vec::new(),
            Customer {
                name: "Maria Silva".to_string(),
                tax_id: "123.456.789-01".to_string(),
                email: "maria@example.com".to_string(),
                phone: "(11) 98765-4321".to_string(),
            },
            PaymentMethod::Card,
            Timestamp::UNIX_EPOCH,
        );

        let started = std::time::Instant::now();

        DelayedSettlement::new(Duration::from_millis(20))
            .settle(&order)
            .await?;

        assert!(started.elapsed() >= Duration::from_millis(20));

        Ok(())
    }
}
