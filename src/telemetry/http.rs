//! Browser `fetch` transport for gameplay events

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, UrlSearchParams};

use super::{EndpointReply, EventForm, Transport};
use crate::error::DeliveryError;

/// POSTs each event as `application/x-www-form-urlencoded`
#[derive(Debug, Clone)]
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn encode(form: &EventForm) -> Result<String, DeliveryError> {
        let params = UrlSearchParams::new().map_err(js_error)?;
        for (key, value) in form.pairs() {
            params.append(key, value);
        }
        Ok(String::from(params.to_string()))
    }
}

impl Transport for FetchTransport {
    async fn send(&self, form: &EventForm) -> Result<EndpointReply, DeliveryError> {
        let body = Self::encode(form)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/x-www-form-urlencoded")
            .map_err(js_error)?;

        let window =
            web_sys::window().ok_or_else(|| DeliveryError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !response.ok() {
            return Err(DeliveryError::Status {
                status: response.status(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn js_error(value: JsValue) -> DeliveryError {
    DeliveryError::Network(format!("{:?}", value))
}
