use murti_admin::AdminApi;
use murti_admin::types::{DeliveryAssignment, OrderQuery};
use murti_core::{OrderId, OrderStatus, UserId};

use crate::error::CliError;
use crate::output::print_json;

pub async fn list(api: &AdminApi, query: &OrderQuery) -> Result<(), CliError> {
    print_json(&api.orders().list(query).await?)
}

pub async fn get(api: &AdminApi, id: &OrderId) -> Result<(), CliError> {
    print_json(&api.orders().get(id).await?)
}

pub async fn update_status(
    api: &AdminApi,
    id: &OrderId,
    status: OrderStatus,
    note: Option<&str>,
) -> Result<(), CliError> {
    let order = api.orders().update_status(id, status, note).await?;
    tracing::info!(order_id = %id, status = %order.status, "Order updated");
    print_json(&order)
}

/// Partner assignment or courier hand-off, from the CLI flags.
pub fn delivery_assignment(
    partner: Option<UserId>,
    courier: Option<String>,
    tracking: Option<String>,
) -> Result<DeliveryAssignment, CliError> {
    match (partner, courier, tracking) {
        (Some(partner), None, None) => Ok(DeliveryAssignment::in_house(partner)),
        (None, Some(courier), Some(tracking)) => Ok(DeliveryAssignment::courier(courier, tracking)),
        _ => Err(CliError::InvalidArgs(
            "use either --partner or --courier with --tracking",
        )),
    }
}

pub async fn assign_delivery(
    api: &AdminApi,
    id: &OrderId,
    assignment: &DeliveryAssignment,
) -> Result<(), CliError> {
    print_json(&api.orders().assign_delivery(id, assignment).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use murti_core::DeliveryMethod;

    #[test]
    fn test_delivery_assignment_from_flags() {
        let assignment = delivery_assignment(Some(UserId::new("u1")), None, None);
        assert!(matches!(
            assignment,
            Ok(DeliveryAssignment {
                method: DeliveryMethod::InHouse,
                ..
            })
        ));
        assert!(delivery_assignment(None, None, None).is_err());
    }
}
