//! Rows the store starts out with.

use crate::{
    record::{CommentRecord, PostRecord, UserRecord},
    table::Tables,
};
use scriptorium_common::model::{Id, user::UserId};
use time::{Duration, OffsetDateTime};

pub const JANE_DOE_ID: &str = "user_1";
pub const JOHN_SMITH_ID: &str = "user_2";

const REACT_POST_CONTENT: &str = r"React 18 introduced some powerful features like automatic batching, transitions, and a new Suspense for data fetching.

### Automatic Batching
Before React 18, batching was only done for React event handlers. Now, state updates inside of promises, setTimeout, native event handlers, or any other event are batched automatically.

```javascript
// Before React 18: 2 re-renders
setTimeout(() => {
  setCount(c => c + 1);
  setFlag(f => !f);
}, 1000);
```

```javascript
// In React 18: Only 1 re-render
setTimeout(() => {
  setCount(c => c + 1);
  setFlag(f => !f);
}, 1000);
```

### Transitions
Transitions are a new concept in React to distinguish between urgent and non-urgent updates. This helps in keeping the UI responsive even during heavy rendering tasks.";

const REACT_POST_SUMMARY: &str = "React 18 brings significant improvements with features like automatic batching, which combines multiple state updates into a single re-render for better performance, and transitions, which help prioritize UI updates to keep the application responsive.";

const TAILWIND_POST_CONTENT: &str = r"Tailwind CSS is a utility-first CSS framework that allows you to build custom designs without ever leaving your HTML. It provides low-level utility classes that let you build completely custom designs without writing any custom CSS.

The main benefit is that you are not fighting with pre-defined component styles. Instead, you're building everything from small, composable utilities.

- **Responsive Design**: Use variants like `md:` and `lg:` to build adaptive user interfaces.
- **Dark Mode**: Tailwind has first-class support for dark mode.
- **Highly Customizable**: You can configure everything from colors to spacing via the `tailwind.config.js` file.";

const TAILWIND_POST_SUMMARY: &str = "Tailwind CSS is a utility-first framework for rapid UI development. It offers low-level utility classes to build custom designs directly in your markup, featuring excellent support for responsive design, dark mode, and extensive customization.";

#[must_use]
pub fn users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: UserId::new_unchecked(JANE_DOE_ID),
            full_name: Some("Jane Doe".to_owned()),
            image_url: "https://picsum.photos/id/237/200/200".to_owned(),
        },
        UserRecord {
            id: UserId::new_unchecked(JOHN_SMITH_ID),
            full_name: Some("John Smith".to_owned()),
            image_url: "https://picsum.photos/id/238/200/200".to_owned(),
        },
    ]
}

/// Two posts, created one and two days before `now`.
#[must_use]
pub fn posts(now: OffsetDateTime) -> Vec<PostRecord> {
    vec![
        PostRecord {
            id: Id::new(1),
            title: "Exploring the new React 18 Features".to_owned(),
            content: REACT_POST_CONTENT.to_owned(),
            summary: Some(REACT_POST_SUMMARY.to_owned()),
            author_id: UserId::new_unchecked(JANE_DOE_ID),
            created_at: now - Duration::days(1),
        },
        PostRecord {
            id: Id::new(2),
            title: "A Guide to Modern CSS with Tailwind".to_owned(),
            content: TAILWIND_POST_CONTENT.to_owned(),
            summary: Some(TAILWIND_POST_SUMMARY.to_owned()),
            author_id: UserId::new_unchecked(JOHN_SMITH_ID),
            created_at: now - Duration::days(2),
        },
    ]
}

#[must_use]
pub fn comments(now: OffsetDateTime) -> Vec<CommentRecord> {
    vec![
        CommentRecord {
            id: Id::new(1),
            post_id: Id::new(1),
            user_id: UserId::new_unchecked(JOHN_SMITH_ID),
            text: "Great overview of React 18!".to_owned(),
            created_at: now,
        },
        CommentRecord {
            id: Id::new(2),
            post_id: Id::new(1),
            user_id: UserId::new_unchecked(JANE_DOE_ID),
            text: "Thanks! Transitions are a game changer.".to_owned(),
            created_at: now,
        },
    ]
}

#[must_use]
pub fn tables(now: OffsetDateTime) -> Tables {
    Tables::new(users(), posts(now), comments(now))
}

#[cfg(test)]
mod tests {
    use crate::seed;
    use scriptorium_common::model::Id;
    use time::macros::datetime;

    #[test]
    fn sequences_continue_after_seed() {
        let mut tables = seed::tables(datetime!(2025-06-01 00:00 UTC));

        assert_eq!(tables.post_count(), 2);
        assert_eq!(tables.comment_count(), 2);
        assert_eq!(tables.post_ids.generate(), Id::new(3));
        assert_eq!(tables.comment_ids.generate(), Id::new(3));
    }
}
