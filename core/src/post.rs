use crate::count::parse_count;

/// Index of a post in document order, assigned at registration.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub usize);

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FollowId(pub usize);

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub username: String,
    pub text: String,
}

/// What the page markup says about a post when it is first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostSnapshot {
    pub likes_text: String,
    pub liked: bool,
    pub saved: bool,
    pub has_media: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PostState {
    pub likes: u64,
    pub liked: bool,
    pub saved: bool,
    pub has_media: bool,
    pub comments: Vec<Comment>,
    pub draft: String,
}

impl PostState {
    pub fn from_snapshot(snapshot: &PostSnapshot) -> Self {
        PostState {
            likes: parse_count(&snapshot.likes_text),
            liked: snapshot.liked,
            saved: snapshot.saved,
            has_media: snapshot.has_media,
            comments: Vec::new(),
            draft: String::new(),
        }
    }

    /// State of a copy made from this post: like/save/comments carry over,
    /// the composer starts empty.
    pub fn cloned_for_feed(&self) -> Self {
        PostState {
            draft: String::new(),
            ..self.clone()
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }
}

pub fn seeded_avatar_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/40/40.jpg", seed)
}

pub fn seeded_media_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}post/600/600.jpg", seed)
}

pub fn seeded_username(seed: &str) -> String {
    format!("user_{}", seed)
}
