// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Constraint chain evaluator.

use std::borrow::Cow;

use ltv_status_tracker::log_item;

use super::{BlockResult, Conclusion, Indication, SubIndication};
use crate::{policy::Level, Result};

/// One check of a [`Chain`].
///
/// A check is a predicate over the tokens and the policy. It has no side
/// effects: the chain records its outcome.
pub trait ChainItem {
    /// Name of the check (one of the
    /// [`validation_codes`](ltv_status_tracker::validation_codes)).
    fn name(&self) -> &'static str;

    /// Question the check answers.
    fn description(&self) -> Cow<'static, str>;

    /// Level of the check. `None` skips the check without a record.
    fn level(&self) -> Option<Level>;

    /// Evaluates the predicate.
    ///
    /// Returns an error only when the check cannot be evaluated at all.
    fn process(&self) -> Result<bool>;

    /// Indication set when the check fails at `FAIL` level.
    fn indication(&self) -> Indication {
        Indication::Indeterminate
    }

    /// Sub-indication set when the check fails at `FAIL` level.
    fn sub_indication(&self) -> Option<SubIndication>;

    /// Message recorded when the check does not pass.
    fn error_message(&self) -> Cow<'static, str>;

    /// Identifier of the token the check is about, when it differs from the
    /// token of the chain.
    fn token_id(&self) -> Option<&str> {
        None
    }
}

/// Outcome of one check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckOutcome {
    /// The check has no level, or the chain had already halted.
    Skipped,

    /// The check's level is `IGNORE`.
    Ignored,

    /// The predicate held.
    Passed,

    /// The predicate did not hold.
    NotPassed,
}

impl CheckOutcome {
    /// Returns `true` if the predicate held.
    pub fn passed(self) -> bool {
        self == Self::Passed
    }
}

/// An ordered run of checks producing a [`BlockResult`].
///
/// The first check failing at `FAIL` level sets the conclusion and halts
/// the chain: later checks are neither evaluated nor recorded.
#[derive(Debug)]
pub struct Chain {
    block: BlockResult,
    halted: bool,
}

impl Chain {
    /// Starts an empty chain.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            block: BlockResult::new(title, None),
            halted: false,
        }
    }

    /// Starts an empty chain about one token. Every record carries the
    /// token's identifier unless the check names another one.
    pub fn for_token(title: impl Into<String>, token_id: &str) -> Self {
        let mut block = BlockResult::new(title, Some(token_id.to_owned()));
        block.checks.push_token_id(token_id);
        Self {
            block,
            halted: false,
        }
    }

    /// Evaluates and records one check.
    pub fn run(&mut self, item: &dyn ChainItem) -> Result<CheckOutcome> {
        if self.halted {
            return Ok(CheckOutcome::Skipped);
        }
        let Some(level) = item.level() else {
            return Ok(CheckOutcome::Skipped);
        };

        let mut record = log_item!(item.name(), item.description(), "Chain::run");
        if let Some(token_id) = item.token_id() {
            record = record.set_token_id(token_id.to_owned());
        }

        if level == Level::Ignore {
            record.ignored(&mut self.block.checks);
            return Ok(CheckOutcome::Ignored);
        }

        if item.process()? {
            record.success(&mut self.block.checks);
            return Ok(CheckOutcome::Passed);
        }

        let message = item.error_message();
        match level {
            Level::Fail => {
                let indication = item.indication();
                let sub_indication = item.sub_indication();
                log::debug!(
                    "{}: check {} failed, chain halted with {indication}",
                    self.block.title,
                    item.name()
                );
                if let Some(sub) = sub_indication {
                    record = record.validation_status(sub.as_str());
                }
                record.failure_no_throw(&mut self.block.checks, &message);
                self.block.conclusion.indication = indication;
                self.block.conclusion.sub_indication = sub_indication;
                self.block.conclusion.error = Some(message.into_owned());
                self.halted = true;
            }
            Level::Warn => {
                record.warning(&mut self.block.checks, &message);
                self.block.conclusion.warnings.push(message.into_owned());
            }
            Level::Inform => {
                record.error(&message).informational(&mut self.block.checks);
                self.block.conclusion.infos.push(message.into_owned());
            }
            Level::Ignore => (),
        }

        Ok(CheckOutcome::NotPassed)
    }

    /// Runs checks in order until the chain halts.
    ///
    /// Returns `true` if the chain did not halt.
    pub fn execute(&mut self, items: &[&dyn ChainItem]) -> Result<bool> {
        for item in items {
            self.run(*item)?;
            if self.halted {
                break;
            }
        }
        Ok(!self.halted)
    }

    /// Returns `true` once a check failed at `FAIL` level.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the current conclusion.
    pub fn conclusion(&self) -> &Conclusion {
        &self.block.conclusion
    }

    /// Records an informational item that is not a check.
    pub fn info(&mut self, label: &'static str, description: impl Into<Cow<'static, str>>) {
        if self.halted {
            return;
        }
        log_item!(label, description.into(), "Chain::info").informational(&mut self.block.checks);
    }

    /// Attaches a nested block.
    pub fn add_sub_block(&mut self, block: BlockResult) {
        self.block.sub_blocks.push(block);
    }

    /// Sets the verdict directly and halts the chain. Warnings and infos
    /// gathered so far are kept.
    pub fn conclude(&mut self, indication: Indication, sub_indication: Option<SubIndication>) {
        self.block.conclusion.indication = indication;
        self.block.conclusion.sub_indication = sub_indication;
        self.halted = true;
    }

    /// Sets the control time computed by the block.
    pub fn set_control_time(&mut self, time: chrono::DateTime<chrono::Utc>) {
        self.block.control_time = Some(time);
    }

    /// Ends the chain.
    pub fn finish(mut self) -> BlockResult {
        self.block.checks.pop_token_id();
        self.block
    }
}
