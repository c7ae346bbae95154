//! In-memory store - used as fallback when no database is configured.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, PostInput, PostWithTags, Tag, TagNames};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, TagRepository};

#[derive(Default)]
struct State {
    posts: HashMap<Uuid, Post>,
    /// Keyed by name, which keeps names unique and listing ordered.
    tags: BTreeMap<String, Tag>,
    /// (post_id, tag_id)
    links: HashSet<(Uuid, Uuid)>,
}

impl State {
    fn ensure_tag(&mut self, name: &str) -> Tag {
        self.tags
            .entry(name.to_owned())
            .or_insert_with(|| Tag::new(name.to_owned()))
            .clone()
    }

    fn attach(&mut self, post_id: Uuid, names: &TagNames) {
        for name in names.iter() {
            let tag = self.ensure_tag(name);
            self.links.insert((post_id, tag.id));
        }
    }

    fn synchronize(&mut self, post_id: Uuid, names: &TagNames) {
        let wanted: HashSet<Uuid> = names.iter().map(|name| self.ensure_tag(name).id).collect();
        self.links
            .retain(|(post, tag)| *post != post_id || wanted.contains(tag));
        for tag_id in wanted {
            self.links.insert((post_id, tag_id));
        }
    }

    /// Tags linked to a post, ordered by name.
    fn tags_of(&self, post_id: Uuid) -> Vec<Tag> {
        self.tags
            .values()
            .filter(|tag| self.links.contains(&(post_id, tag.id)))
            .cloned()
            .collect()
    }

    fn has_tag_named(&self, post_id: Uuid, name: &str) -> bool {
        self.tags
            .get(name)
            .is_some_and(|tag| self.links.contains(&(post_id, tag.id)))
    }

    fn aggregate(&self, post: &Post) -> PostWithTags {
        PostWithTags {
            post: post.clone(),
            tags: self.tags_of(post.id),
        }
    }
}

/// In-memory implementation of every storage port.
///
/// A single async RwLock guards all state, so each mutation is applied
/// atomically. Note: Data is lost on process restart.
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn ensure_tag(&self, name: &str) -> Result<Tag, RepoError> {
        Ok(self.state.write().await.ensure_tag(name))
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        Ok(self.state.read().await.tags.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: Post, tags: Option<&TagNames>) -> Result<PostWithTags, RepoError> {
        let mut state = self.state.write().await;
        if state.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }

        if let Some(names) = tags {
            state.attach(post.id, names);
        }
        let created = state.aggregate(&post);
        state.posts.insert(post.id, post);
        Ok(created)
    }

    async fn list(&self, tag: Option<&str>) -> Result<Vec<PostWithTags>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<&Post> = state
            .posts
            .values()
            .filter(|post| tag.is_none_or(|name| state.has_tag_named(post.id, name)))
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts.into_iter().map(|post| state.aggregate(post)).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithTags>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).map(|post| state.aggregate(post)))
    }

    async fn update(
        &self,
        id: Uuid,
        input: PostInput,
        tags: Option<&TagNames>,
    ) -> Result<PostWithTags, RepoError> {
        let mut state = self.state.write().await;
        let post = state.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.revise(input);
        let post = post.clone();

        if let Some(names) = tags {
            state.synchronize(id, names);
        }
        Ok(state.aggregate(&post))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.posts.remove(&id).ok_or(RepoError::NotFound)?;
        state.links.retain(|(post, _)| *post != id);
        Ok(())
    }
}
