// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-runtime collaborator traits and the exactly-once reply handle.
//
// The surrounding application embeds some host runtime (a Flutter engine,
// a test harness) that owns the real transport. This module reduces it to
// the two things the channel needs: a place to hang a named handler, and a
// way to run a closure on the caller's main context.

use std::sync::Arc;

use iconwerk_bridge::traits::SwitchCompletion;
use iconwerk_core::error::Result;
use iconwerk_core::types::{MethodCall, MethodResult, ReplyValue};

/// The host runtime's messenger, as seen by this channel.
pub trait MethodChannelHost: Send + Sync {
    /// Register `handler` for calls on the named channel, replacing any
    /// previous handler.
    fn register_handler(&self, channel: &str, handler: Arc<dyn MethodCallHandler>);

    /// Remove the handler for the named channel.
    fn unregister_handler(&self, channel: &str);

    /// Run a closure on the context responses must be delivered on
    /// (typically the main/UI thread).
    fn run_on_main(&self, task: Box<dyn FnOnce() + Send + 'static>);
}

/// Receiver side of a method channel.
pub trait MethodCallHandler: Send + Sync {
    fn on_method_call(&self, call: MethodCall, reply: Reply);
}

type DeliverFn = Box<dyn FnOnce(MethodResult) + Send + 'static>;

/// Single-use response handle for one inbound call.
///
/// Ownership enforces the response contract: `send` consumes the handle, so
/// at most one response can ever leave, and every dispatch path must either
/// send or convert the handle into a switch completion — there is no way to
/// answer twice and no silent way to answer on the wrong context. Delivery
/// always hops through [`MethodChannelHost::run_on_main`].
pub struct Reply {
    host: Arc<dyn MethodChannelHost>,
    deliver: DeliverFn,
}

impl Reply {
    pub fn new(
        host: Arc<dyn MethodChannelHost>,
        deliver: impl FnOnce(MethodResult) + Send + 'static,
    ) -> Self {
        Self {
            host,
            deliver: Box::new(deliver),
        }
    }

    /// Deliver the response on the host's main context.
    pub fn send(self, outcome: Result<ReplyValue>) {
        let Reply { host, deliver } = self;
        let result = MethodResult::from(outcome);
        host.run_on_main(Box::new(move || deliver(result)));
    }

    /// Adapt this reply into the bridge's switch-completion shape.
    /// A successful switch answers with the absent value.
    pub fn into_completion(self) -> SwitchCompletion {
        Box::new(move |outcome: Result<()>| self.send(outcome.map(|()| ReplyValue::None)))
    }
}
