//! Shared domain records for serializer tests.

#![allow(dead_code)]

use jserializer::{Document, Field, Record};
use serde_json::json;

pub struct Person {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub country: Option<String>,
}

impl Person {
    pub fn new(name: &str, age: u32, gender: &str) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            country: None,
        }
    }

    pub fn living_in(mut self, country: &str) -> Self {
        self.country = Some(country.into());
        self
    }
}

impl Record for Person {
    fn type_name(&self) -> &str {
        "Person"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "name" => Some(Field::value(self.name.as_str())),
            "age" => Some(Field::value(self.age)),
            "gender" => Some(Field::value(self.gender.as_str())),
            "country" => Some(Field::value(self.country.clone())),
            _ => None,
        }
    }
}

pub struct User {
    pub id: u64,
    pub name: String,
    pub password: String,
    pub auth_key: String,
    pub active: bool,
}

impl User {
    pub fn sam(active: bool) -> Self {
        Self {
            id: 123,
            name: "Sam".into(),
            password: "abc".into(),
            auth_key: "top_secret".into(),
            active,
        }
    }
}

impl Record for User {
    fn type_name(&self) -> &str {
        "User"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::value(self.id)),
            "name" => Some(Field::value(self.name.as_str())),
            "password" => Some(Field::value(self.password.as_str())),
            "auth_key" => Some(Field::value(self.auth_key.as_str())),
            "active" => Some(Field::value(self.active)),
            _ => None,
        }
    }
}

pub struct Comment {
    pub id: u64,
    pub body: String,
    pub commenter: String,
}

impl Record for Comment {
    fn type_name(&self) -> &str {
        "Comment"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::value(self.id)),
            "body" => Some(Field::value(self.body.as_str())),
            "commenter" => Some(Field::value(self.commenter.as_str())),
            _ => None,
        }
    }
}

pub struct Author {
    pub name: String,
}

impl Record for Author {
    fn type_name(&self) -> &str {
        "Author"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "name" => Some(Field::value(self.name.as_str())),
            _ => None,
        }
    }
}

pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub comments: Option<Vec<Comment>>,
    pub author: Option<Author>,
}

impl Post {
    pub fn new(id: u64, title: &str, content: &str) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            comments: None,
            author: None,
        }
    }

    /// Comments numbered 1..=n, as in "This is comment #1" by "User 1".
    pub fn with_comments(mut self, n: u64) -> Self {
        self.comments = Some(
            (1..=n)
                .map(|i| Comment {
                    id: i,
                    body: format!("This is comment #{i}"),
                    commenter: format!("User {i}"),
                })
                .collect(),
        );
        self
    }

    pub fn by(mut self, author: &str) -> Self {
        self.author = Some(Author {
            name: author.into(),
        });
        self
    }
}

impl Record for Post {
    fn type_name(&self) -> &str {
        "Post"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::value(self.id)),
            "title" => Some(Field::value(self.title.as_str())),
            "content" => Some(Field::value(self.content.as_str())),
            "comments" => Some(match &self.comments {
                Some(comments) => Field::many(comments),
                None => Field::Null,
            }),
            "author" => Some(Field::one(self.author.as_ref())),
            _ => None,
        }
    }
}

pub struct Account {
    pub id: u64,
    pub name: String,
}

impl Record for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" | "ext_id" => Some(Field::value(self.id)),
            "name" => Some(Field::value(self.name.as_str())),
            _ => None,
        }
    }

    fn to_document(&self) -> Option<Document> {
        match json!({"id": self.id, "name": self.name}) {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

pub struct Blog {
    pub name: String,
    pub url: String,
    pub posts: Vec<Post>,
    pub account: Option<Account>,
}

impl Record for Blog {
    fn type_name(&self) -> &str {
        "Blog"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "name" => Some(Field::value(self.name.as_str())),
            "url" => Some(Field::value(self.url.as_str())),
            "posts" => Some(Field::many(&self.posts)),
            "post_ids" | "post_codes" => Some(Field::value(
                self.posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            )),
            "account" => Some(Field::one(self.account.as_ref())),
            _ => None,
        }
    }
}

pub fn build_blog(total_posts: u64, comments_per_post: u64) -> Blog {
    Blog {
        name: "New Blog".into(),
        url: "www.blog.com".into(),
        posts: (1..=total_posts)
            .map(|i| {
                Post::new(i, &format!("Post {i}"), &format!("Text {i}"))
                    .with_comments(comments_per_post)
                    .by(&format!("Author {i}"))
            })
            .collect(),
        account: Some(Account {
            id: 100,
            name: "Account 0".into(),
        }),
    }
}

pub struct Applicant {
    pub id: u64,
    pub name: String,
}

impl Record for Applicant {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::value(self.id)),
            "name" => Some(Field::value(self.name.as_str())),
            _ => None,
        }
    }
}

pub struct Job {
    pub id: u64,
    pub description: String,
    pub applicants: Vec<Applicant>,
}

impl Record for Job {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::value(self.id)),
            "description" => Some(Field::value(self.description.as_str())),
            "applicants" => Some(Field::many(&self.applicants)),
            _ => None,
        }
    }
}

pub fn build_jobs(total_jobs: u64, total_applicants: u64) -> Vec<Job> {
    (1..=total_jobs)
        .map(|id| Job {
            id,
            description: format!("Job {id}"),
            applicants: (1..=total_applicants)
                .map(|id| Applicant {
                    id,
                    name: format!("applicant {id}"),
                })
                .collect(),
        })
        .collect()
}

/// Output keys of a JSON object, in order.
pub fn keys(value: &serde_json::Value) -> Vec<&str> {
    value
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
