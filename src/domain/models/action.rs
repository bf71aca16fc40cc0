use super::ChatPrompt;
use super::Credentials;
use super::UploadRequest;

/// Work the UI asks the background actions service to carry out.
pub enum Action {
    Login(Credentials),
    Register(Credentials),
    Logout(),
    SubmitChat(ChatPrompt),
    FetchChatLog(i64),
    FetchImage(i64),
    Upload(UploadRequest),
    GenerateReport { user_id: i64, title: String },
    Abort(),
}
