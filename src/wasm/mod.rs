// SPDX-License-Identifier: MIT OR Apache-2.0

//! Methods exported for WebAssembly targets.
//!
//! The web client decodes nothing itself: it hands the raw dry-run body to `propose`, renders
//! one selector per returned choice and passes the chosen candidates to `buildTransferPlan`.
use std::panic;

use console_error_panic_hook::hook as panic_hook;
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::config::PlannerConfig;
use crate::dry_run::{DeletionSubject, DryRunReport};
use crate::plan::DeletionRequest;
use crate::planner::OwnershipTransferPlanner as PlannerNonWasm;
use crate::selection::TransferSelections;

mod serde;

pub use self::serde::serialize_to_js;

macro_rules! jserr {
    ($l:expr) => {
        $l.map_err::<JsValue, _>(|err| js_sys::Error::new(&format!("{}", err)).into())?
    };
}

/// Sets a [`panic hook`] for better error messages in the browser console.
///
/// [`panic hook`]: https://crates.io/crates/console_error_panic_hook
#[wasm_bindgen(js_name = setWasmPanicHook)]
pub fn set_wasm_panic_hook() {
    panic::set_hook(Box::new(panic_hook));
}

#[wasm_bindgen(js_name = OwnershipTransferPlanner)]
#[derive(Debug, Clone)]
pub struct OwnershipTransferPlanner(PlannerNonWasm);

#[wasm_bindgen(js_class = OwnershipTransferPlanner)]
impl OwnershipTransferPlanner {
    /// Returns a planner. `config` is an optional object with the fields `sort_key`
    /// ("first_name" or "display_name"), `strict` and `skip_cascaded_groups`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OwnershipTransferPlanner, JsValue> {
        let config: PlannerConfig = if config.is_undefined() || config.is_null() {
            PlannerConfig::default()
        } else {
            jserr!(serde_wasm_bindgen::from_value(config))
        };

        Ok(Self(PlannerNonWasm::new(config)))
    }

    /// Computes the transfer choices for a dry-run body.
    ///
    /// `subject` is `{ type: "user" | "group", id }`. Throws when the dry-run body is malformed,
    /// when a blocking item has no candidate left, or when a group deletion reports groups
    /// needing a new manager.
    pub fn propose(&self, dry_run: JsValue, subject: JsValue) -> Result<JsValue, JsValue> {
        let body: Value = jserr!(serde_wasm_bindgen::from_value(dry_run));
        let report = jserr!(DryRunReport::from_value(body));
        let subject: DeletionSubject = jserr!(serde_wasm_bindgen::from_value(subject));

        let proposal = jserr!(self.0.propose(&report, &subject));
        let result = jserr!(serialize_to_js(&proposal));
        Ok(result)
    }

    /// Turns `[{ kind, id, candidateId }]` selections into the `transfer` object of the
    /// deletion request.
    #[wasm_bindgen(js_name = buildTransferPlan)]
    pub fn build_transfer_plan(&self, selections: JsValue) -> Result<JsValue, JsValue> {
        let selections: TransferSelections = jserr!(serde_wasm_bindgen::from_value(selections));
        let plan = self.0.build_transfer_plan(&selections);
        let result = jserr!(serialize_to_js(&plan));
        Ok(result)
    }

    /// Same as `buildTransferPlan`, returning the JSON encoded request body.
    #[wasm_bindgen(js_name = deletionRequest)]
    pub fn deletion_request(&self, selections: JsValue) -> Result<String, JsValue> {
        let selections: TransferSelections = jserr!(serde_wasm_bindgen::from_value(selections));
        let request = DeletionRequest::new(self.0.build_transfer_plan(&selections));
        let json = jserr!(request.to_json());
        Ok(json)
    }
}
