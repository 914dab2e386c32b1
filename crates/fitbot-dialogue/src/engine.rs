//! The dialogue engine: one transition per inbound message.

use crate::error::DialogueError;
use crate::input::Input;
use crate::menu::{Action, BindValue, Fallback, MenuNode, MenuTree};
use crate::template::render;
use fitbot_core::{stage::Stage, value::Scalar};
use fitbot_sessions::{Session, SessionData};
use tracing::debug;

/// Something the caller must do besides sending replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Delete the session.
    EndSession,
    /// A flow finished; `details` is the form data it collected.
    Notify { event: String, details: SessionData },
}

/// The result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Replies, in send order.
    pub messages: Vec<String>,
    pub next_stage: Stage,
    /// The session's form data after the transition.
    pub data: SessionData,
    pub effects: Vec<Effect>,
}

impl Outcome {
    /// Write the new stage and form data into the session.
    pub fn apply(&self, session: &mut Session) {
        session.stage = self.next_stage;
        session.data = self.data.clone();
    }

    pub fn ends_session(&self) -> bool {
        self.effects.contains(&Effect::EndSession)
    }
}

/// Runs a validated [`MenuTree`].
#[derive(Debug, Clone)]
pub struct Engine {
    tree: MenuTree,
}

impl Engine {
    /// Validate the tree and wrap it.
    pub fn new(tree: MenuTree) -> Result<Self, DialogueError> {
        tree.validate()?;
        Ok(Self { tree })
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// The apology for a failed transition, personalized when possible.
    pub fn apology(&self, contact: &str) -> String {
        render(&self.tree.apology, contact, &SessionData::new())
            .unwrap_or_else(|_| self.tree.apology.clone())
    }

    /// Evaluate `raw_input` against the session's current node.
    ///
    /// Pure: the session is only read. On error nothing has changed and
    /// the caller decides how to recover.
    pub fn process(&self, session: &Session, raw_input: &str) -> Result<Outcome, DialogueError> {
        let input = Input::parse(raw_input);
        let node = self.tree.node(session.stage)?;

        let mut step = Step {
            tree: &self.tree,
            session,
            input,
            stage: session.stage,
            data: session.data.clone(),
            messages: Vec::new(),
            effects: Vec::new(),
        };

        match route(node, &input)? {
            Route::Act(action) => step.act(action)?,
            Route::Reject(text) => step.say(text)?,
        }

        debug!(
            "{}: {} -> {} ({} message(s))",
            session.recipient_id(),
            session.stage,
            step.stage,
            step.messages.len()
        );

        Ok(Outcome {
            messages: step.messages,
            next_stage: step.stage,
            data: step.data,
            effects: step.effects,
        })
    }
}

enum Route<'a> {
    Act(&'a Action),
    Reject(&'a str),
}

/// Pick the rule that handles `input` at `node`.
fn route<'a>(node: &'a MenuNode, input: &Input<'_>) -> Result<Route<'a>, DialogueError> {
    if input.is_zero() {
        if let Some(zero) = &node.zero {
            return Ok(Route::Act(zero));
        }
    }
    if let Some(any) = &node.any {
        return Ok(Route::Act(any));
    }

    let fallback = match input {
        Input::Digit(d) => match node.choice(*d) {
            Some(action) => return Ok(Route::Act(action)),
            None => node.bad_digit.as_ref(),
        },
        Input::Text(_) => node.free_text.as_ref(),
    };

    match fallback {
        Some(Fallback::Reject { text }) => Ok(Route::Reject(text)),
        Some(Fallback::Accept { action }) => Ok(Route::Act(action)),
        None => Err(DialogueError::Unhandled(node.stage)),
    }
}

/// Working state for one transition.
struct Step<'a> {
    tree: &'a MenuTree,
    session: &'a Session,
    input: Input<'a>,
    stage: Stage,
    data: SessionData,
    messages: Vec<String>,
    effects: Vec<Effect>,
}

impl Step<'_> {
    fn say(&mut self, template: &str) -> Result<(), DialogueError> {
        let text = render(template, self.session.display_name(), &self.data)?;
        if !text.is_empty() {
            self.messages.push(text);
        }
        Ok(())
    }

    fn act(&mut self, action: &Action) -> Result<(), DialogueError> {
        let tree = self.tree;
        match action {
            Action::Goto { stage } => {
                let target = tree.node(*stage)?;
                self.say(&target.prompt)?;
                self.stage = *stage;
            }
            Action::Say { text } => self.say(text)?,
            Action::Home => {
                self.say(&tree.main_menu)?;
                self.data.clear();
                self.stage = Stage::Start;
            }
            Action::Bind { key, value, then } => {
                let value = match value {
                    BindValue::Literal { value } => Scalar::from(value.as_str()),
                    BindValue::Input => Scalar::from(self.input.as_text()),
                    BindValue::DisplayName => Scalar::from(self.session.display_name()),
                };
                self.data.insert(key.clone(), value);
                self.act(then)?;
            }
            Action::Complete { template, event } => {
                self.say(template)?;
                self.effects.push(Effect::Notify {
                    event: event.clone(),
                    details: std::mem::take(&mut self.data),
                });
                self.stage = Stage::Start;
            }
            Action::Exit { text } => {
                self.say(text)?;
                self.effects.push(Effect::EndSession);
                self.data.clear();
                self.stage = Stage::Start;
            }
        }
        Ok(())
    }
}
