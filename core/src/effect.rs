use crate::post::{Comment, FollowId, PostId};
use crate::search_result::SearchEntry;
use crate::task::{HeartId, Task, ToastId};
use crate::theme::Theme;

/// A change the controller wants made to the page or to the timer set.
///
/// Effects are applied in order. Element-targeting variants name elements
/// by the ids the controller handed out at registration.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum Effect {
    Schedule { task: Task, delay_ms: u32 },
    ScheduleRepeating { task: Task, every_ms: u32 },
    Cancel(Task),

    ApplyTheme(Theme),
    PersistTheme(Theme),
    BodyTransition(bool),

    SetLiked { post: PostId, liked: bool },
    SetLikeCount { post: PostId, text: String },
    /// Small heart floating up from the post's like button.
    FloatingHeart { heart: HeartId, post: PostId },
    /// Large heart centered over the post's media.
    BigHeart { heart: HeartId, post: PostId },
    RemoveHeart(HeartId),

    SetCommentSubmitEnabled { post: PostId, enabled: bool },
    AppendComment { post: PostId, comment: Comment },
    ClearCommentInput { post: PostId },

    SetUploadModalOpen(bool),
    UploadHighlight(bool),
    UploadLoading,
    UploadPrompt,

    SetStoryModalOpen(bool),
    SetStoryProgress(u8),

    ShowSearchResults { query: String, entries: Vec<SearchEntry> },
    HideSearchResults,
    FocusSearch,

    SetFollowing { button: FollowId, following: bool },
    SetSaved { post: PostId, saved: bool },

    ShowToast { toast: ToastId, message: String },
    ToastLeaving(ToastId),
    RemoveToast(ToastId),

    ShowFeedLoading,
    RemoveFeedLoading,
    /// Copy `template` into a new post with id `post`, personalized by `seed`.
    AppendPost { post: PostId, template: PostId, seed: String },
}
