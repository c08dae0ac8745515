//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: engine bridge to the Client
//! - [`Driver`]: platform-specific I/O

use banter_proto::UserId;

use crate::{App, AppAction, AppEvent, Bridge, Driver, ScrollEffect};

/// Generic runtime that orchestrates App, Bridge, and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver, acting as `local_user`.
    pub fn new(driver: D, local_user: UserId) -> Self {
        let app = App::new(local_user.clone());
        let bridge = Bridge::new(local_user);
        Self { driver, app, bridge }
    }

    /// Run the main event loop until the driver's input source closes.
    ///
    /// Each cycle:
    /// 1. Polls for a UI event from the driver
    /// 2. Receives events from the channel
    /// 3. Processes actions and events between App and Bridge
    /// 4. Flushes outgoing intents and executes pending REST requests
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        let actions = self.app.handle(AppEvent::Started);
        self.process_actions(actions).await?;

        loop {
            match self.driver.poll_event().await? {
                Some(event) => {
                    let actions = self.app.handle(event);
                    self.process_actions(actions).await?;
                },
                None => break,
            }

            if let Some(event) = self.driver.recv_event().await {
                let events = self.bridge.handle_server_event(event);
                self.process_bridge_events(events).await?;
            }
        }

        Ok(())
    }

    /// Process actions returned by the App, draining the whole cascade:
    /// engine results feed back into the App, whose actions feed the
    /// engine again, until both queues are empty.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<(), D::Error> {
        let mut pending_actions = initial_actions;

        loop {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::ScrollToBottom => self.driver.scroll(ScrollEffect::ToBottom)?,
                    AppAction::SetScroll { offset } => {
                        self.driver.scroll(ScrollEffect::ToOffset(offset))?;
                    },

                    // Engine operations go through the bridge.
                    other => {
                        for event in self.bridge.process_app_action(other) {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }

            pending_actions.extend(self.flush_io().await?);
            if pending_actions.is_empty() {
                break;
            }
        }
        Ok(())
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<(), D::Error> {
        let mut actions = Vec::new();
        for event in events {
            actions.extend(self.app.handle(event));
        }
        self.process_actions(actions).await
    }

    /// Send pending intents and execute pending REST requests. Responses
    /// are fed through the bridge; any resulting App actions are returned
    /// for the caller's drain loop.
    async fn flush_io(&mut self) -> Result<Vec<AppAction>, D::Error> {
        for intent in self.bridge.take_outgoing() {
            self.driver.emit(intent).await?;
        }

        let mut actions = Vec::new();
        for request in self.bridge.take_requests() {
            if let Some(response) = self.driver.execute(request).await {
                for event in self.bridge.handle_api_response(response) {
                    actions.extend(self.app.handle(event));
                }
            }
        }
        Ok(actions)
    }

    /// The App state, for rendering.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable App state, for test setup.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
