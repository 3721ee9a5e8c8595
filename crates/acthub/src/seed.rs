// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `acthub seed` -- insert demo posts so the dashboard has something to
//! show before a mailbox is wired up.

use chrono::{Duration, SecondsFormat, Utc};

use acthub_config::HubConfig;
use acthub_core::{ActionType, Category, HubError, NewPost, PostStatus};

use crate::store::open_store;

pub async fn run(config: &HubConfig) -> Result<(), HubError> {
    let store = open_store(config).await?;

    let mut inserted = 0;
    for post in demo_posts() {
        let id = store.insert_post(&post).await?.id();
        tracing::debug!(id, title = %post.title, "demo post inserted");
        inserted += 1;
    }
    tracing::info!(inserted, "seed complete");
    Ok(())
}

fn demo_posts() -> Vec<NewPost> {
    let now = Utc::now();
    let at = |hours_ago: i64| {
        (now - Duration::hours(hours_ago)).to_rfc3339_opts(SecondsFormat::Secs, true)
    };

    vec![
        NewPost {
            title: "Urgent: Website Issue Needs Immediate Attention".to_string(),
            content: "Our campaign website is showing errors on the donation page. \
                      Visitors are reporting they cannot complete donations.\n\n\
                      This is affecting our fundraising efforts and needs to be fixed ASAP.\n\n\
                      Error details: Payment gateway timeout after 30 seconds."
                .to_string(),
            sender: "tech@examplecampaign.org".to_string(),
            recipient: "team@examplecampaign.org".to_string(),
            category: Category::Urgent,
            action_type: ActionType::TechnicalSupport,
            status: PostStatus::New,
            source_id: None,
            created_at: at(0),
        },
        NewPost {
            title: "Please share our new policy announcement".to_string(),
            content: "We've just published our new environmental policy and need to \
                      spread the word.\n\nPlease share this on all social media channels."
                .to_string(),
            sender: "policy@examplecampaign.org".to_string(),
            recipient: "social@examplecampaign.org".to_string(),
            category: Category::SocialMedia,
            action_type: ActionType::SocialShare,
            status: PostStatus::New,
            source_id: None,
            created_at: at(1),
        },
        NewPost {
            title: "Response needed: Media inquiry about upcoming rally".to_string(),
            content: "We've received an inquiry from the Tribune about our upcoming \
                      rally.\n\nThey want to know:\n1. Expected attendance numbers\n\
                      2. Main topics to be addressed\n3. Whether any special guests will \
                      be speaking\n\nCan someone draft a response by end of day?"
                .to_string(),
            sender: "media@tribune.example.com".to_string(),
            recipient: "press@examplecampaign.org".to_string(),
            category: Category::EmailAction,
            action_type: ActionType::EmailResponse,
            status: PostStatus::New,
            source_id: None,
            created_at: at(3),
        },
        NewPost {
            title: "Volunteers needed for Saturday canvassing".to_string(),
            content: "We need to organize volunteers for this Saturday's canvassing \
                      event downtown.\n\nWe should aim for at least 20 volunteers split \
                      into 10 teams. Please reach out to our volunteer list and \
                      coordinate logistics."
                .to_string(),
            sender: "volunteer@examplecampaign.org".to_string(),
            recipient: "team@examplecampaign.org".to_string(),
            category: Category::Volunteer,
            action_type: ActionType::VolunteerRequest,
            status: PostStatus::New,
            source_id: None,
            created_at: at(24),
        },
        NewPost {
            title: "Town hall meeting schedule for next month".to_string(),
            content: "Draft schedule for the next round of town halls is attached. \
                      Please confirm venue availability and update the shared calendar."
                .to_string(),
            sender: "events@examplecampaign.org".to_string(),
            recipient: "team@examplecampaign.org".to_string(),
            category: Category::Events,
            action_type: ActionType::EventCoordination,
            status: PostStatus::New,
            source_id: None,
            created_at: at(30),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_posts_cover_distinct_categories() {
        let posts = demo_posts();
        assert_eq!(posts.len(), 5);
        let mut categories: Vec<Category> = posts.iter().map(|p| p.category).collect();
        categories.dedup();
        assert_eq!(categories.len(), posts.len(), "no category repeats");
        assert!(posts.iter().all(|p| p.status == PostStatus::New));
        assert!(posts.iter().all(|p| p.source_id.is_none()));
    }
}
