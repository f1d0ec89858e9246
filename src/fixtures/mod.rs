//! Deterministic fixture data for demo mode and harness rendering.

use crate::domain::{
    Activity, ActivityKind, AppliedCommunity, ApplicationStatus, BookCategory, Comment,
    CommunitySummary, LibraryBook, Post, ReadingStatus, RecruitStatus, RecruitingCommunity,
    Snapshot, Viewer, WishlistBook,
};

const DEMO_VIEWER_ID: u64 = 1;

const BOOKS: [(&str, &str, &str); 10] = [
    ("Demian", "Hermann Hesse", "Minumsa"),
    ("The Vegetarian", "Han Kang", "Changbi"),
    ("Pachinko", "Min Jin Lee", "Grand Central"),
    ("Cosmos", "Carl Sagan", "Random House"),
    ("Sapiens", "Yuval Noah Harari", "Harper"),
    ("Almond", "Sohn Won-pyung", "Changbi"),
    ("Stoner", "John Williams", "Viking"),
    ("The Selfish Gene", "Richard Dawkins", "Oxford"),
    ("Norwegian Wood", "Haruki Murakami", "Vintage"),
    ("Meditations", "Marcus Aurelius", "Penguin"),
];

const COMMUNITY_NAMES: [&str; 6] = [
    "Slow Readers",
    "Sunday Classics",
    "Night Owls",
    "Science Circle",
    "Essay Club",
    "First Chapters",
];

/// Returns the full demo snapshot.
pub fn demo_snapshot() -> Snapshot {
    Snapshot {
        viewer: Viewer {
            id: DEMO_VIEWER_ID,
            nickname: "mina".to_owned(),
        },
        posts: demo_posts(),
        applied_communities: demo_applied_communities(),
        recruiting_communities: demo_recruiting_communities(),
        library: demo_library(),
        wishlist: demo_wishlist(),
        activities: demo_activities(),
    }
}

fn demo_posts() -> Vec<Post> {
    vec![
        Post {
            id: "post-1".to_owned(),
            community_name: "Slow Readers".to_owned(),
            title: "Demian, chapters 1-3: Sinclair's two worlds".to_owned(),
            author_id: 2,
            author_nickname: Some("jun".to_owned()),
            content: "Which of the two worlds felt more real to you on first read?".to_owned(),
            created_at: "2026-03-01T09:00:00Z".to_owned(),
            comments: vec![
                Comment::new(
                    "c-101",
                    3,
                    "The light world, oddly. The dark one reads like a rumour.",
                    "2026-03-01T10:00:00Z",
                )
                .with_nickname("sora"),
                Comment::new(
                    "c-102",
                    DEMO_VIEWER_ID,
                    "Franz Kromer makes the dark world concrete for me.",
                    "2026-03-01T10:20:00Z",
                )
                .with_nickname("mina"),
                Comment::new(
                    "c-103",
                    2,
                    "Agreed, the Kromer episode is the hinge of the chapter.",
                    "2026-03-01T10:35:00Z",
                )
                .with_parent("c-102")
                .with_nickname("jun"),
                Comment::new(
                    "c-104",
                    3,
                    "And Demian arrives exactly when Kromer becomes unbearable.",
                    "2026-03-01T10:50:00Z",
                )
                .with_parent("c-103")
                .with_nickname("sora"),
                Comment::new(
                    "c-105",
                    4,
                    "Replying to a comment that was removed earlier.",
                    "2026-03-01T11:05:00Z",
                )
                .with_parent("c-099")
                .with_nickname("hyun"),
                Comment::new(
                    "c-106",
                    DEMO_VIEWER_ID,
                    "Good point about timing.",
                    "2026-03-01T10:40:00Z",
                )
                .with_parent("c-101")
                .with_nickname("mina"),
            ],
        },
        Post {
            id: "post-2".to_owned(),
            community_name: "Science Circle".to_owned(),
            title: "Cosmos: favourite chapter?".to_owned(),
            author_id: DEMO_VIEWER_ID,
            author_nickname: Some("mina".to_owned()),
            content: "Mine is 'The Backbone of Night'.".to_owned(),
            created_at: "2026-03-02T20:00:00Z".to_owned(),
            comments: Vec::new(),
        },
    ]
}

fn community(index: usize) -> CommunitySummary {
    let (book_title, _, _) = BOOKS[index % BOOKS.len()];
    CommunitySummary {
        id: 100 + index as u64,
        name: format!(
            "{} #{}",
            COMMUNITY_NAMES[index % COMMUNITY_NAMES.len()],
            index + 1
        ),
        book_title: book_title.to_owned(),
        member_count: 2 + (index % 6) as u32,
        capacity: 8,
        created_at: day(index),
    }
}

fn demo_applied_communities() -> Vec<AppliedCommunity> {
    (0..20)
        .map(|index| AppliedCommunity {
            community: community(index),
            status: match index % 4 {
                0 | 1 => ApplicationStatus::Pending,
                2 => ApplicationStatus::Accepted,
                _ => ApplicationStatus::Rejected,
            },
            applied_at: day(index + 1),
        })
        .collect()
}

fn demo_recruiting_communities() -> Vec<RecruitingCommunity> {
    (0..12)
        .map(|index| RecruitingCommunity {
            community: community(20 + index),
            recruit_status: if index % 3 == 2 {
                RecruitStatus::Closed
            } else {
                RecruitStatus::Recruiting
            },
            pending_applications: (index % 4) as u32,
        })
        .collect()
}

fn demo_library() -> Vec<LibraryBook> {
    (0..30)
        .map(|index| {
            let (title, author, publisher) = BOOKS[index % BOOKS.len()];
            LibraryBook {
                isbn: format!("97889{:08}", 1000 + index),
                title: if index < BOOKS.len() {
                    title.to_owned()
                } else {
                    format!("{title} (vol. {})", index / BOOKS.len() + 1)
                },
                author: author.to_owned(),
                publisher: publisher.to_owned(),
                reading_status: if index % 3 == 0 {
                    ReadingStatus::Finished
                } else {
                    ReadingStatus::Reading
                },
                added_at: day(index),
            }
        })
        .collect()
}

fn demo_wishlist() -> Vec<WishlistBook> {
    const CATEGORIES: [BookCategory; 5] = [
        BookCategory::Fiction,
        BookCategory::Essay,
        BookCategory::Humanities,
        BookCategory::Science,
        BookCategory::Other,
    ];

    (0..14)
        .map(|index| {
            let (title, author, _) = BOOKS[(index * 3) % BOOKS.len()];
            WishlistBook {
                isbn: format!("97911{:08}", 2000 + index),
                title: title.to_owned(),
                author: author.to_owned(),
                category: CATEGORIES[index % CATEGORIES.len()],
                added_at: day(index + 2),
            }
        })
        .collect()
}

fn demo_activities() -> Vec<Activity> {
    (0..25)
        .map(|index| {
            let kind = if index % 2 == 0 {
                ActivityKind::Comment
            } else {
                ActivityKind::Post
            };
            Activity {
                id: format!("act-{}", index + 1),
                kind,
                post_id: if index % 5 == 0 { "post-1" } else { "post-2" }.to_owned(),
                community_name: COMMUNITY_NAMES[index % COMMUNITY_NAMES.len()].to_owned(),
                excerpt: match kind {
                    ActivityKind::Post => format!("Weekly check-in {}", index + 1),
                    ActivityKind::Comment => format!("Reply in discussion {}", index + 1),
                },
                created_at: day(index),
            }
        })
        .collect()
}

/// Midday UTC on the `offset`-th day of February 2026, wrapping into March.
fn day(offset: usize) -> String {
    let offset = offset % 56;
    let (month, day) = if offset < 28 {
        (2, offset + 1)
    } else {
        (3, offset - 27)
    };
    format!("2026-{month:02}-{day:02}T12:00:00Z")
}

#[cfg(test)]
mod tests {
    use super::{day, demo_snapshot};
    use crate::thread::{build_tree, count_all};

    #[test]
    fn demo_posts_build_into_threads() {
        let snapshot = demo_snapshot();
        let post = &snapshot.posts[0];
        let tree = build_tree(post.comments.clone());

        assert_eq!(count_all(&tree), post.comments.len());
        assert!(tree.iter().any(|root| root.id == "c-105"));
    }

    #[test]
    fn fixture_days_stay_valid() {
        assert_eq!(day(0), "2026-02-01T12:00:00Z");
        assert_eq!(day(27), "2026-02-28T12:00:00Z");
        assert_eq!(day(28), "2026-03-01T12:00:00Z");
    }
}
