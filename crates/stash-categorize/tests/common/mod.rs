//! In-memory repositories for pipeline tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use stash_categorize::{BatchCategorizer, Stores};
use stash_core::{
    normalize, AssignmentRepository, Bookmark, BookmarkRepository, Category, CategoryRepository,
    CategoryUpsert, CreateBookmarkRequest, CreateCategoryRequest, Error, LabelClassifier, Result,
    UpdateCategoryRequest, User, UserRepository,
};

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Default)]
pub struct FakeCategories {
    rows: Mutex<Vec<Category>>,
    failing_names: Mutex<HashSet<String>>,
    fail_list: Mutex<bool>,
    hide_from_list: Mutex<bool>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl FakeCategories {
    pub fn seed(&self, user_id: Uuid, name: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            color: "#6B7280".to_string(),
            icon: "📁".to_string(),
            created_at: Utc::now(),
            count: 0,
        };
        self.rows.lock().unwrap().push(category.clone());
        category
    }

    /// Make `create` fail for this name (any casing).
    pub fn fail_create(&self, name: &str) {
        self.failing_names
            .lock()
            .unwrap()
            .insert(normalize(name).to_string());
    }

    pub fn fail_list(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    /// Make `list_for_user` return nothing while rows stay in storage, as
    /// when another run creates categories after this one loaded them.
    pub fn hide_from_list(&self) {
        *self.hide_from_list.lock().unwrap() = true;
    }

    pub fn all(&self) -> Vec<Category> {
        self.rows.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryRepository for FakeCategories {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            return Err(Error::Internal("category store unavailable".to_string()));
        }
        if *self.hide_from_list.lock().unwrap() {
            return Ok(Vec::new());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, req: CreateCategoryRequest) -> Result<CategoryUpsert> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let key = normalize(&req.name);
        if self.failing_names.lock().unwrap().contains(key.as_str()) {
            return Err(Error::Internal(format!("cannot create {}", req.name)));
        }

        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter()
            .find(|c| c.user_id == req.user_id && normalize(&c.name) == key)
        {
            return Ok(CategoryUpsert {
                category: existing.clone(),
                inserted: false,
            });
        }
        let category = Category {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            name: req.name,
            color: req.color,
            icon: req.icon,
            created_at: Utc::now(),
            count: 0,
        };
        rows.push(category.clone());
        Ok(CategoryUpsert {
            category,
            inserted: true,
        })
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Category> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned()
            .ok_or(Error::CategoryNotFound(id))
    }

    async fn update(&self, id: Uuid, _user_id: Uuid, _req: UpdateCategoryRequest) -> Result<()> {
        Err(Error::CategoryNotFound(id))
    }

    async fn delete(&self, id: Uuid, _user_id: Uuid) -> Result<()> {
        Err(Error::CategoryNotFound(id))
    }
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

#[derive(Default)]
pub struct FakeAssignments {
    pairs: Mutex<HashSet<(Uuid, Uuid)>>,
    failing_categories: Mutex<HashSet<Uuid>>,
    pub assign_calls: AtomicUsize,
}

impl FakeAssignments {
    pub fn fail_for_category(&self, category_id: Uuid) {
        self.failing_categories.lock().unwrap().insert(category_id);
    }

    pub fn pairs(&self) -> HashSet<(Uuid, Uuid)> {
        self.pairs.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.assign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssignmentRepository for FakeAssignments {
    async fn assign(&self, bookmark_id: Uuid, category_id: Uuid, _user_id: Uuid) -> Result<()> {
        self.assign_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_categories.lock().unwrap().contains(&category_id) {
            return Err(Error::Internal("assignment rejected".to_string()));
        }
        self.pairs.lock().unwrap().insert((bookmark_id, category_id));
        Ok(())
    }

    async fn unassign(&self, bookmark_id: Uuid, category_id: Uuid, _user_id: Uuid) -> Result<()> {
        self.pairs.lock().unwrap().remove(&(bookmark_id, category_id));
        Ok(())
    }

    async fn categories_for_bookmark(&self, _bookmark_id: Uuid) -> Result<Vec<Category>> {
        Ok(Vec::new())
    }
}

// =============================================================================
// BOOKMARKS / USERS
// =============================================================================

#[derive(Default)]
pub struct FakeBookmarks {
    rows: Mutex<Vec<Bookmark>>,
}

impl FakeBookmarks {
    /// Add a bookmark created `age_minutes` ago.
    pub fn seed(&self, user_id: Uuid, tweet_id: &str, text: &str, age_minutes: i64) -> Bookmark {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            user_id,
            tweet_id: tweet_id.to_string(),
            tweet_text: text.to_string(),
            author_username: "author".to_string(),
            author_display_name: "Author".to_string(),
            tweet_url: String::new(),
            media_urls: Vec::new(),
            bookmarked_at: created_at,
            created_at,
        };
        self.rows.lock().unwrap().push(bookmark.clone());
        bookmark
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl BookmarkRepository for FakeBookmarks {
    async fn insert(&self, req: CreateBookmarkRequest) -> Result<Option<Bookmark>> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|b| b.user_id == req.user_id && b.tweet_id == req.tweet_id)
        {
            return Ok(None);
        }
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            tweet_id: req.tweet_id,
            tweet_text: req.tweet_text,
            author_username: req.author_username,
            author_display_name: req.author_display_name,
            tweet_url: req.tweet_url,
            media_urls: req.media_urls,
            bookmarked_at: req.bookmarked_at,
            created_at: Utc::now(),
        };
        rows.push(bookmark.clone());
        Ok(Some(bookmark))
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Bookmark> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .cloned()
            .ok_or(Error::BookmarkNotFound(id))
    }

    /// Returns every bookmark of the user; the fake does not track
    /// assignments.
    async fn list_uncategorized(&self, user_id: Uuid, limit: i64) -> Result<Vec<Bookmark>> {
        let mut rows: Vec<Bookmark> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl FakeUsers {
    pub fn add(&self, auto_categorize: bool) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            twitter_id: "42".to_string(),
            username: "tester".to_string(),
            display_name: "Tester".to_string(),
            profile_image: String::new(),
            auto_categorize,
            created_at: Utc::now(),
        };
        let id = user.id;
        self.rows.lock().unwrap().insert(id, user);
        id
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn get(&self, id: Uuid) -> Result<User> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("User {}", id)))
    }
}

// =============================================================================
// HARNESS
// =============================================================================

pub struct Harness {
    pub categories: Arc<FakeCategories>,
    pub assignments: Arc<FakeAssignments>,
    pub bookmarks: Arc<FakeBookmarks>,
    pub users: Arc<FakeUsers>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(FakeCategories::default()),
            assignments: Arc::new(FakeAssignments::default()),
            bookmarks: Arc::new(FakeBookmarks::default()),
            users: Arc::new(FakeUsers::default()),
        }
    }

    pub fn categorizer(&self, classifier: impl LabelClassifier + 'static) -> BatchCategorizer {
        let stores = Stores {
            categories: self.categories.clone(),
            assignments: self.assignments.clone(),
            bookmarks: self.bookmarks.clone(),
            users: self.users.clone(),
        };
        BatchCategorizer::new(stores, Arc::new(classifier))
    }
}
