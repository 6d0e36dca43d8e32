//! Sample content for a fresh installation. Safe to run repeatedly.

use chrono::{Duration, Utc};

use vlog_core::domain::{Category, Post, User};
use vlog_core::form::PostDraft;
use vlog_core::ports::PasswordService;
use vlog_core::slug::slugify;
use vlog_infra::Repositories;

struct SampleVlog {
    title: &'static str,
    description: &'static str,
    video_url: &'static str,
    category: &'static str,
    by_admin: bool,
    tags: &'static str,
    days_ago: i64,
}

const CATEGORIES: [(&str, &str); 4] = [
    ("Django Tutorials", "Learn Django web development"),
    ("Python Basics", "Python programming fundamentals"),
    ("Web Development", "Web development tips and tricks"),
    ("Technology News", "Latest tech news and updates"),
];

const VLOGS: [SampleVlog; 4] = [
    SampleVlog {
        title: "Getting Started with Django",
        description: "Learn the basics of Django framework including models, views, and templates.",
        video_url: "https://www.youtube.com/watch?v=rHux0gMZ3Eg",
        category: "Django Tutorials",
        by_admin: true,
        tags: "django, python, tutorial, beginner",
        days_ago: 5,
    },
    SampleVlog {
        title: "Python List Comprehensions Explained",
        description: "Master Python list comprehensions with practical examples and use cases.",
        video_url: "https://www.youtube.com/watch?v=DxCJBeF2MqE",
        category: "Python Basics",
        by_admin: false,
        tags: "python, list comprehension, tutorial",
        days_ago: 3,
    },
    SampleVlog {
        title: "Responsive Web Design with Bootstrap",
        description: "Create beautiful responsive websites using Bootstrap CSS framework.",
        video_url: "https://www.youtube.com/watch?v=ZxoDjaCHiBo",
        category: "Web Development",
        by_admin: true,
        tags: "bootstrap, css, responsive, web design",
        days_ago: 2,
    },
    SampleVlog {
        title: "Latest AI Technology Trends 2024",
        description: "Discover the latest trends in artificial intelligence and machine learning.",
        video_url: "https://www.youtube.com/watch?v=kCc8FmEb1nY",
        category: "Technology News",
        by_admin: false,
        tags: "ai, machine learning, technology, news",
        days_ago: 1,
    },
];

async fn ensure_user(
    repos: &Repositories,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
    is_staff: bool,
) -> anyhow::Result<User> {
    if let Some(user) = repos.users.find_by_username(username).await? {
        return Ok(user);
    }

    let mut user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        passwords.hash(password)?,
    );
    user.is_staff = is_staff;
    let user = repos.users.create(user).await?;

    tracing::warn!(username, "Sample account created with its default password");
    Ok(user)
}

pub async fn seed_sample_data(
    repos: &Repositories,
    passwords: &dyn PasswordService,
) -> anyhow::Result<()> {
    let admin = ensure_user(repos, passwords, "admin", "admin123", true).await?;
    let creator = ensure_user(repos, passwords, "creator", "creator123", false).await?;

    let mut categories = Vec::new();
    for (name, description) in CATEGORIES {
        let category = match repos.categories.find_by_name(name).await? {
            Some(category) => category,
            None => {
                let category = Category::new(
                    name.to_string(),
                    slugify(name),
                    Some(description.to_string()),
                );
                let category = repos.categories.save(category).await?;
                tracing::info!(category = %category.name, "Sample category created");
                category
            }
        };
        categories.push(category);
    }

    for sample in &VLOGS {
        let slug = slugify(sample.title);
        if repos.posts.slug_exists(&slug).await? {
            continue;
        }
        let Some(category) = categories.iter().find(|c| c.name == sample.category) else {
            continue;
        };

        let author = if sample.by_admin { &admin } else { &creator };
        let draft = PostDraft {
            title: sample.title.to_string(),
            video_url: sample.video_url.to_string(),
            description: sample.description.to_string(),
            category_id: category.id,
            tags: sample.tags.to_string(),
            thumbnail: None,
            published_date: Utc::now() - Duration::days(sample.days_ago),
        };
        let post = repos.posts.save(Post::new(author.id, slug, draft)).await?;
        tracing::info!(post_id = post.id, title = %post.title, "Sample vlog created");
    }

    tracing::info!("Sample data ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlog_core::query::PostFilter;
    use vlog_infra::Argon2PasswordService;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let repos = Repositories::in_memory();
        let passwords = Argon2PasswordService::new();

        seed_sample_data(&repos, &passwords).await.unwrap();
        seed_sample_data(&repos, &passwords).await.unwrap();

        assert_eq!(repos.categories.list().await.unwrap().len(), 4);
        assert_eq!(repos.posts.count(&PostFilter::all()).await.unwrap(), 4);

        let admin = repos.users.find_by_username("admin").await.unwrap().unwrap();
        assert!(admin.is_staff);
        assert!(passwords.verify("admin123", &admin.password_hash).unwrap());
    }
}
