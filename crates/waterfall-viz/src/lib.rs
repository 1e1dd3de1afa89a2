//! Dashboard host entry point.
//!
//! The host page provides the chart container `#root`, the tooltip `#tt`
//! and the global `dscc` library. On start the chart subscribes once to
//! `dscc.subscribeToData` with the table transform and fully redraws on
//! every payload.

pub mod console;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use waterfall::{ChartError, DataCallback, DataSource, HostData, WaterfallChart, connect};
use waterfall_renderer_zoon::DomSurface;

pub const CONTAINER_ID: &str = "root";
pub const TOOLTIP_ID: &str = "tt";
const HOST_GLOBAL: &str = "dscc";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console::install(log::LevelFilter::Warn);
    let surface = DomSurface::from_ids(CONTAINER_ID, TOOLTIP_ID)?;
    let chart = Rc::new(RefCell::new(WaterfallChart::new(surface)));
    let mut source = HostSource::from_global()?;
    connect(chart, &mut source);
    zoon::println!("waterfall: subscribed to host data");
    Ok(())
}

/// The host's data-change notification, bound through `dscc`.
pub struct HostSource {
    host: JsValue,
    subscribe_to_data: Function,
    table_transform: JsValue,
}

impl HostSource {
    pub fn from_global() -> Result<Self, JsValue> {
        let host = Reflect::get(&js_sys::global(), &HOST_GLOBAL.into())?;
        if host.is_undefined() || host.is_null() {
            return Err(JsValue::from_str("host library `dscc` is not loaded"));
        }
        let subscribe_to_data = Reflect::get(&host, &"subscribeToData".into())?
            .dyn_into::<Function>()
            .map_err(|_| JsValue::from_str("dscc.subscribeToData is not a function"))?;
        let table_transform = Reflect::get(&host, &"tableTransform".into())?;
        Ok(Self {
            host,
            subscribe_to_data,
            table_transform,
        })
    }
}

impl DataSource for HostSource {
    fn subscribe(&mut self, mut on_data: DataCallback) {
        let callback = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |payload: JsValue| {
            match decode_payload(payload) {
                Ok(data) => on_data(data),
                Err(error) => zoon::eprintln!("waterfall: {error}, keeping the previous chart"),
            }
        }));
        let options = Object::new();
        let subscribed = Reflect::set(&options, &"transform".into(), &self.table_transform)
            .and_then(|_| {
                self.subscribe_to_data
                    .call2(&self.host, callback.as_ref(), &options)
            });
        match subscribed {
            // The host calls it for as long as the page lives.
            Ok(_) => callback.forget(),
            Err(error) => zoon::eprintln!("waterfall: subscribing to host data failed: {error:?}"),
        }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    /// The JS value could not be read as JSON data at all.
    Js(serde_wasm_bindgen::Error),
    Payload(ChartError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Js(error) => write!(f, "unreadable host payload: {error}"),
            DecodeError::Payload(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Js(error) => Some(error),
            DecodeError::Payload(error) => Some(error),
        }
    }
}

pub fn decode_payload(payload: JsValue) -> Result<HostData, DecodeError> {
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(payload).map_err(DecodeError::Js)?;
    HostData::from_value(value).map_err(DecodeError::Payload)
}
