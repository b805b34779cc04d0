use std::time::Duration;
use log::{debug, warn};
use reqwest::{Client, Response};
use crate::server::model::dish::{DishId, WireCategory};
use crate::server::model::order::{
    BulkQuantityRequest, CreateOrderRequest, CreateOrderResponse, OrderRow, OrderStatus, QuantityUpdate, TableId,
};
use crate::server::model::receipt::ReceiptTemplate;
use crate::server::upstream::{Backend, UpstreamError};

/// reqwest client bound to the backend base url
#[derive(Clone)]
pub(crate) struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turn non-2xx responses into errors, logging the call that failed.
    fn check(call: &str, res: Response) -> Result<Response, UpstreamError> {
        let status = res.status();
        if !status.is_success() {
            warn!("{} failed with status {}", call, status);
            return Err(UpstreamError::Status { status: status.as_u16() });
        }
        debug!("{} ok", call);
        Ok(res)
    }
}

impl Backend for HttpBackend {
    async fn fetch_categories(&self) -> Result<Vec<WireCategory>, UpstreamError> {
        let res = self.client.get(self.url("categories")).send().await?;
        Ok(Self::check("fetch_categories", res)?.json().await?)
    }

    async fn fetch_orders(&self, table_id: TableId, status: OrderStatus) -> Result<Vec<OrderRow>, UpstreamError> {
        let res = self
            .client
            .get(self.url("orders"))
            .query(&[("table_id", table_id.to_string()), ("status", status.to_string())])
            .send()
            .await?;
        Ok(Self::check("fetch_orders", res)?.json().await?)
    }

    async fn create_cart_order(
        &self,
        table_id: TableId,
        dish_id: DishId,
        quantity: i32,
    ) -> Result<CreateOrderResponse, UpstreamError> {
        let res = self
            .client
            .post(self.url("orders"))
            .json(&CreateOrderRequest {
                table_id,
                dish_id,
                order_qty: quantity,
                order_status: OrderStatus::InCart,
            })
            .send()
            .await?;
        Ok(Self::check("create_cart_order", res)?.json().await?)
    }

    async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), UpstreamError> {
        let res = self
            .client
            .put(self.url("orders"))
            .json(&BulkQuantityRequest { orders: updates })
            .send()
            .await?;
        Self::check("update_quantities", res).map(|_| ())
    }

    async fn checkout(&self, table_id: TableId) -> Result<(), UpstreamError> {
        let res = self
            .client
            .patch(self.url(&format!("tables/{}/orders/checkout", table_id)))
            .send()
            .await?;
        Self::check("checkout", res).map(|_| ())
    }

    async fn fetch_receipt_template(&self) -> Result<Option<String>, UpstreamError> {
        let res = self.client.get(self.url("receipt-template")).send().await?;
        let template: ReceiptTemplate = Self::check("fetch_receipt_template", res)?.json().await?;
        Ok(template.content)
    }

    async fn save_receipt_template(&self, content: String) -> Result<(), UpstreamError> {
        let res = self
            .client
            .put(self.url("receipt-template"))
            .json(&ReceiptTemplate { content: Some(content) })
            .send()
            .await?;
        Self::check("save_receipt_template", res).map(|_| ())
    }
}
