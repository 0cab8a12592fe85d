//! Process-wide in-memory store backing both domain ports.
//!
//! One [`MemoryStore`] instance is shared (via `Arc`) by every connection
//! handler. Mutations take the single write lock, so signup uniqueness and
//! comment ordering cannot be violated by interleaving, and a committed write
//! is visible to the very next read from any other connection. Nothing
//! survives a process restart.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{CommentStore, UserDirectory};
use crate::domain::{
    render_markup, Comment, CommentIndex, DisplayName, EmailAddress, Error, Password, Question,
    QuestionSnapshot, Registration, StyleRun, User, UserId,
};

/// Directory entry pairing the public identity with its credential.
struct UserRecord {
    user: User,
    password: Password,
}

struct StoreState {
    users: Vec<UserRecord>,
    question: Question,
    comments: Vec<Comment>,
}

/// Shared in-memory implementation of [`UserDirectory`] and [`CommentStore`].
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Create an empty store around the given question.
    pub fn new(question: Question) -> Self {
        Self {
            state: RwLock::new(StoreState {
                users: Vec::new(),
                question,
                comments: Vec::new(),
            }),
        }
    }

    /// Create the store pre-populated with the example thread: the fixed
    /// question, two registered users, and one plain comment from each.
    ///
    /// # Errors
    /// Returns an internal error if the compiled-in seed data fails
    /// validation, so automated checks catch accidental regressions.
    pub fn with_example_thread() -> Result<Self, Error> {
        let question = Question::new(
            "Is this a good way to process input?",
            "def process(line):\n    tokens = line.split()\n    return [int(t) for t in tokens if t.isdigit()]\n",
        )
        .map_err(|err| Error::internal(format!("invalid seed question: {err}")))?;

        let store = Self::new(question);
        let alice = store.register_seed_user("Alice A.", "alice_2002@gmail.com", "aaa")?;
        let bob = store.register_seed_user("Bob B.", "bob_2001@gmail.com", "bbb")?;
        store.append_seed_comment(&alice, "Test comment 1")?;
        store.append_seed_comment(&bob, "Test comment 2")?;
        Ok(store)
    }

    fn register_seed_user(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let seed_error = |err| Error::internal(format!("invalid seed user: {err}"));
        let display_name = DisplayName::new(display_name).map_err(seed_error)?;
        let email = EmailAddress::new(email).map_err(seed_error)?;
        let password = Password::new(password).map_err(seed_error)?;

        let user = User::new(UserId::random(), display_name, email);
        self.write()?.users.push(UserRecord {
            user: user.clone(),
            password,
        });
        Ok(user)
    }

    fn append_seed_comment(&self, author: &User, text: &str) -> Result<(), Error> {
        let run = StyleRun::plain(text)
            .map_err(|err| Error::internal(format!("invalid seed comment: {err}")))?;
        let markup = render_markup(&[run])?;
        self.write()?
            .comments
            .push(Comment::new(author.display_name().clone(), markup));
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, Error> {
        self.state
            .read()
            .map_err(|_| Error::internal("store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, Error> {
        self.state
            .write()
            .map_err(|_| Error::internal("store lock poisoned"))
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        // The uniqueness check and the insert happen under one write lock so
        // concurrent signups cannot both claim the same address.
        let mut state = self.write()?;
        if state
            .users
            .iter()
            .any(|record| record.user.email() == registration.email())
        {
            return Err(Error::duplicate_email("email already registered")
                .with_details(serde_json::json!({ "field": "email" })));
        }

        let (display_name, email, password) = registration.into_parts();
        let user = User::new(UserId::random(), display_name, email);
        state.users.push(UserRecord {
            user: user.clone(),
            password,
        });
        info!(user_id = %user.id(), "registered new user");
        Ok(user)
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<User, Error> {
        self.read()?
            .users
            .iter()
            .find(|record| record.user.email() == email && record.password == *password)
            .map(|record| record.user.clone())
            .ok_or_else(|| Error::invalid_credentials("invalid email or password"))
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.read()?
            .users
            .iter()
            .find(|record| record.user.id() == id)
            .map(|record| record.user.clone())
            .ok_or_else(|| Error::not_authenticated("session does not match a known user"))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn question(&self) -> Result<QuestionSnapshot, Error> {
        let state = self.read()?;
        Ok(QuestionSnapshot {
            question: state.question.clone(),
            comments: state.comments.clone(),
        })
    }

    async fn post_comment(
        &self,
        author: &DisplayName,
        runs: &[StyleRun],
    ) -> Result<Comment, Error> {
        // Canonicalise before taking the lock; a contract violation must not
        // touch the thread.
        let markup = render_markup(runs)?;
        let comment = Comment::new(author.clone(), markup);
        self.write()?.comments.push(comment.clone());
        Ok(comment)
    }

    async fn remove_comment(&self, index: CommentIndex) -> Result<Comment, Error> {
        let mut state = self.write()?;
        let resolved = index.resolve(state.comments.len()).ok_or_else(|| {
            Error::index_out_of_range("no comment at this position").with_details(
                serde_json::json!({ "index": index.raw(), "length": state.comments.len() }),
            )
        })?;
        Ok(state.comments.remove(resolved))
    }
}
