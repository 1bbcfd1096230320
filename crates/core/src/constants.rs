//! Application-wide constants.

/// Fixed page sizes per public list view.
pub const BLOG_PAGE_SIZE: i64 = 10;
pub const PORTFOLIO_PAGE_SIZE: i64 = 9;
pub const OFFERINGS_PAGE_SIZE: i64 = 12;
pub const ORGANIZATIONS_PAGE_SIZE: i64 = 25;
pub const CONTACTS_PAGE_SIZE: i64 = 50;
pub const SUBMISSIONS_PAGE_SIZE: i64 = 25;

/// Sidebar / homepage list limits.
pub const FEATURED_LIMIT: i64 = 3;
pub const RECENT_POSTS_LIMIT: i64 = 5;
pub const RELATED_LIMIT: usize = 3;

/// RSS feed item count.
pub const FEED_ITEM_LIMIT: i64 = 20;

/// Contact form message bounds (characters).
pub const MESSAGE_MIN_LEN: usize = 10;
pub const MESSAGE_MAX_LEN: usize = 5000;

/// Captured request metadata bounds.
pub const USER_AGENT_MAX_LEN: usize = 500;
pub const REFERER_MAX_LEN: usize = 200;

/// CRM dashboard list limits.
pub const RECENT_INTERACTIONS_LIMIT: i64 = 10;
pub const RECENT_ORGANIZATIONS_LIMIT: i64 = 10;
pub const UPCOMING_FOLLOW_UPS_LIMIT: i64 = 10;
pub const ORGANIZATION_INTERACTIONS_LIMIT: i64 = 20;

/// Business-plan dashboard limits.
pub const RECENT_MILESTONES_LIMIT: i64 = 5;
pub const UPCOMING_OPPORTUNITIES_LIMIT: i64 = 5;
