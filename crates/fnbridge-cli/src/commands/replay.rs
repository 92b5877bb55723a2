//! `fnbridge replay` — run a recorded envelope through the adapter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use fnbridge_core::{Adapter, BridgeConfig, InvocationContext};
use fnbridge_v2::{HttpApiTranslator, TracingObserver};
use tracing::info;

use crate::handlers;
use crate::{HandlerKind, PayloadVersion};

pub struct ReplayOptions {
    pub payload: PayloadVersion,
    pub envelope: PathBuf,
    pub config: Option<PathBuf>,
    pub handler: HandlerKind,
    pub request_id: String,
    pub function_arn: String,
    pub observe: bool,
}

pub fn replay(opts: &ReplayOptions) -> Result<()> {
    let config = super::config::load(opts.config.as_deref())?;
    let payload = std::fs::read(&opts.envelope)
        .with_context(|| format!("failed to read envelope {}", opts.envelope.display()))?;
    let ctx = InvocationContext::new(opts.request_id.as_str(), opts.function_arn.as_str());

    info!(
        payload = ?opts.payload,
        handler = ?opts.handler,
        envelope = %opts.envelope.display(),
        "replaying envelope"
    );

    let outbound = run(opts.payload, opts.handler, config, opts.observe, &payload, &ctx)?;
    println!("{}", serde_json::to_string_pretty(&outbound)?);
    Ok(())
}

/// Translate `payload`, run the selected handler, and return the outbound
/// envelope as JSON.
pub fn run(
    version: PayloadVersion,
    kind: HandlerKind,
    config: BridgeConfig,
    observe: bool,
    payload: &[u8],
    ctx: &InvocationContext,
) -> Result<serde_json::Value> {
    let handler = handlers::select(kind);

    let outbound = match version {
        PayloadVersion::V1 => {
            fnbridge_v1::adapter_with_config(config, handler).invoke_json(payload, ctx)
        }
        PayloadVersion::V2 => {
            let mut translator = HttpApiTranslator::new(config);
            if observe {
                translator = translator.with_observer(Arc::new(TracingObserver));
            }
            Adapter::new(translator, handler).invoke_json(payload, ctx)
        }
    };

    outbound.context("invocation failed")
}
