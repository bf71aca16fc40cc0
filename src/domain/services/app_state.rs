#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::Router;
use super::Scroll;
use super::SessionStore;
use super::SharedData;
use super::UploadFlow;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::AuthForm;
use crate::domain::models::ChatLogEntry;
use crate::domain::models::ChatPrompt;
use crate::domain::models::ChatReply;
use crate::domain::models::ImagePreview;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Route;
use crate::domain::models::Session;

/// Per-operation in-flight state. Responses carry the sequence token they
/// were issued with; anything that arrives with a token other than the
/// currently pending one is stale and gets discarded instead of racing the
/// newer request for the shared state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending(u64),
    Done,
    Failed,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        return matches!(self, RequestState::Pending(_));
    }
}

pub enum Modal {
    ChatLogPending(),
    ChatLog(Vec<ChatLogEntry>),
    ImagePending(),
    Image(ImagePreview),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTarget {
    Chat(i64),
    Image(i64),
}

pub struct AppState {
    pub route: Route,
    pub session_store: SessionStore,
    shared: Option<SharedData>,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub panel_scroll: Scroll,
    pub panel_selected: usize,
    pub chat_request: RequestState,
    request_seq: u64,
    pub search_chat: bool,
    pub search_image: bool,
    pub login_form: AuthForm,
    pub signup_form: AuthForm,
    pub upload: UploadFlow,
    pub modal: Option<Modal>,
    pub report_pending: bool,
    pub report_status: Option<String>,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl AppState {
    pub fn new(session_store: SessionStore) -> AppState {
        let route = match session_store.is_authenticated() {
            true => Route::Home,
            false => Route::Landing,
        };

        return AppState {
            route,
            session_store,
            shared: None,
            messages: vec![],
            scroll: Scroll::default(),
            panel_scroll: Scroll::default(),
            panel_selected: 0,
            chat_request: RequestState::Idle,
            request_seq: 0,
            search_chat: true,
            search_image: true,
            login_form: AuthForm::login(),
            signup_form: AuthForm::signup(),
            upload: UploadFlow::default(),
            modal: None,
            report_pending: false,
            report_status: None,
            last_known_width: 0,
            last_known_height: 0,
        };
    }

    /// Runs the route guard and moves to whatever it resolves to. Leaving a
    /// route aborts its in-flight worker and closing over the chat route
    /// drops the shared-data provider along with the conversation.
    pub fn navigate(&mut self, target: Route, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let next = Router::resolve(target, &self.session_store).route();
        if next == self.route {
            return Ok(());
        }

        tx.send(Action::Abort())?;
        self.modal = None;

        if self.route == Route::Chat {
            self.shared = None;
            self.messages.clear();
            self.chat_request = RequestState::Idle;
            self.panel_selected = 0;
        }
        if next == Route::Chat {
            self.shared = Some(SharedData::default());
        }

        self.route = next;
        return Ok(());
    }

    /// Shared data is only meaningful while its provider (the chat route) is
    /// mounted; anything reaching for it outside that window is a bug, so
    /// fail fast instead of handing back empty data.
    pub fn shared(&self) -> Result<&SharedData> {
        match &self.shared {
            Some(shared) => return Ok(shared),
            None => bail!("shared data accessed while the chat page is not mounted"),
        }
    }

    pub fn shared_mut(&mut self) -> Result<&mut SharedData> {
        match &mut self.shared {
            Some(shared) => return Ok(shared),
            None => bail!("shared data accessed while the chat page is not mounted"),
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn submit_prompt(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        // The transcript reflects the send immediately, before any network
        // response, and is never rolled back.
        let history = self
            .messages
            .iter()
            .map(|m| return (m.author.clone(), m.text.to_string()))
            .collect::<Vec<_>>();
        self.add_message(Message::new(Author::User, text));

        self.request_seq += 1;
        let seq = self.request_seq;
        self.chat_request = RequestState::Pending(seq);

        tx.send(Action::SubmitChat(ChatPrompt {
            seq,
            text: text.to_string(),
            user_id: self.session_store.user_id(),
            history,
            search_chat: self.search_chat,
            search_image: self.search_image,
        }))?;

        return Ok(());
    }

    pub fn handle_chat_completed(&mut self, seq: u64, reply: ChatReply) -> Result<()> {
        if self.chat_request != RequestState::Pending(seq) {
            tracing::debug!(seq = seq, "discarding stale chat response");
            return Ok(());
        }

        self.chat_request = RequestState::Done;
        self.shared_mut()?
            .replace_results(reply.chat_responses, reply.image_responses);
        self.panel_selected = 0;
        self.add_message(Message::new(Author::Bot, &reply.text));
        return Ok(());
    }

    pub fn handle_chat_failed(&mut self, seq: u64) {
        if self.chat_request != RequestState::Pending(seq) {
            tracing::debug!(seq = seq, "discarding stale chat failure");
            return;
        }

        self.chat_request = RequestState::Failed;
        self.add_message(Message::new_with_type(
            Author::Bot,
            MessageType::Error,
            "Error processing chat log.",
        ));
    }

    pub fn handle_auth_succeeded(&mut self, session: Session) {
        self.session_store.set(session);
        self.login_form.clear();
        self.signup_form.clear();
        self.route = Route::Home;
    }

    pub fn handle_auth_failed(&mut self, error: &str) {
        match self.route {
            Route::Login => self.login_form.set_error(error),
            Route::SignUp => self.signup_form.set_error(error),
            _ => (),
        }
    }

    /// The session is gone no matter how the logout POST fared.
    pub fn handle_logged_out(&mut self) {
        self.session_store.clear();
        self.shared = None;
        self.messages.clear();
        self.chat_request = RequestState::Idle;
        self.modal = None;
        self.route = Route::Landing;
    }

    pub fn selected_card(&self) -> Result<Option<CardTarget>> {
        let shared = self.shared()?;
        let chat_count = shared.chat_responses().len();

        if self.panel_selected < chat_count {
            let id = shared.chat_responses()[self.panel_selected].chat_id;
            return Ok(Some(CardTarget::Chat(id)));
        }

        let image_idx = self.panel_selected - chat_count;
        if image_idx < shared.image_responses().len() {
            let id = shared.image_responses()[image_idx].image_id;
            return Ok(Some(CardTarget::Image(id)));
        }

        return Ok(None);
    }

    pub fn panel_select_next(&mut self) -> Result<()> {
        let count = self.shared()?.card_count();
        if count > 0 && self.panel_selected + 1 < count {
            self.panel_selected += 1;
        }
        return Ok(());
    }

    pub fn panel_select_prev(&mut self) -> Result<()> {
        self.panel_selected = self.panel_selected.saturating_sub(1);
        return Ok(());
    }

    /// Line span a card occupies in the rendered panel. Chat cards take three
    /// lines, image cards two.
    fn panel_card_span(&self, index: usize) -> Result<(u16, u16)> {
        let chat_count = self.shared()?.chat_responses().len();
        if index < chat_count {
            let first = index * 3;
            return Ok((first as u16, (first + 2) as u16));
        }

        let first = chat_count * 3 + (index - chat_count) * 2;
        return Ok((first as u16, (first + 1) as u16));
    }

    /// Recomputes the panel scroll window for the given viewport height and
    /// shifts it so the selected card is on screen.
    pub fn sync_panel_scroll(&mut self, viewport: u16) -> Result<()> {
        let shared = self.shared()?;
        let chat_count = shared.chat_responses().len();
        let image_count = shared.image_responses().len();

        let total = match chat_count + image_count {
            0 => 1,
            _ => chat_count * 3 + image_count * 2,
        };
        self.panel_scroll.set_state(total as u16, viewport);

        if chat_count + image_count > 0 {
            let (first, last) = self.panel_card_span(self.panel_selected)?;
            self.panel_scroll.reveal(first, last);
        }

        return Ok(());
    }

    pub fn open_selected_card(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match self.selected_card()? {
            Some(CardTarget::Chat(chat_id)) => {
                self.modal = Some(Modal::ChatLogPending());
                tx.send(Action::FetchChatLog(chat_id))?;
            }
            Some(CardTarget::Image(image_id)) => {
                self.modal = Some(Modal::ImagePending());
                tx.send(Action::FetchImage(image_id))?;
            }
            None => (),
        }

        return Ok(());
    }

    pub fn handle_chat_log_loaded(&mut self, entries: Vec<ChatLogEntry>) {
        if matches!(self.modal, Some(Modal::ChatLogPending())) {
            if entries.is_empty() {
                self.modal = Some(Modal::Text("No chatlog available.".to_string()));
            } else {
                self.modal = Some(Modal::ChatLog(entries));
            }
        }
    }

    pub fn handle_chat_log_failed(&mut self) {
        if matches!(self.modal, Some(Modal::ChatLogPending())) {
            self.modal = Some(Modal::Text("Failed to fetch chatlog.".to_string()));
        }
    }

    /// A preview landing after its modal is gone is dropped on the spot,
    /// which releases the preview file.
    pub fn handle_image_loaded(&mut self, preview: ImagePreview) {
        if matches!(self.modal, Some(Modal::ImagePending())) {
            self.modal = Some(Modal::Image(preview));
        }
    }

    pub fn handle_image_failed(&mut self) {
        if matches!(self.modal, Some(Modal::ImagePending())) {
            self.modal = Some(Modal::Text("Error fetching image.".to_string()));
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn submit_report(
        &mut self,
        title: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if title.trim().is_empty() {
            self.report_status = Some("Please enter a title for your report.".to_string());
            return Ok(());
        }

        self.report_pending = true;
        self.report_status = None;
        tx.send(Action::GenerateReport {
            user_id: self.session_store.user_id(),
            title: title.to_string(),
        })?;

        return Ok(());
    }

    pub fn handle_report_saved(&mut self, path: &std::path::Path) {
        self.report_pending = false;
        self.report_status = Some(format!("Saved report to {}", path.display()));
    }

    pub fn handle_report_failed(&mut self, error: &str) {
        self.report_pending = false;
        self.report_status = Some(error.to_string());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn transcript_line_count(&self, line_max_width: usize) -> usize {
        return self
            .messages
            .iter()
            .map(|m| return m.as_string_lines(line_max_width).len())
            .sum();
    }

    fn sync_dependants(&mut self) {
        let width = usize::from(self.last_known_width.max(3)) - 2;
        let lines = self.transcript_line_count(width);

        self.scroll
            .set_state(lines as u16, self.last_known_height);

        if self.chat_request.is_pending() {
            self.scroll.last();
        }
    }
}
