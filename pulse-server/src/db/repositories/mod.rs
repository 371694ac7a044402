mod comment_repository;
mod engagement_repository;
mod follower_repository;
mod post_repository;
mod user_repository;

pub use comment_repository::CommentRepository;
pub use engagement_repository::EngagementRepository;
pub use follower_repository::FollowerRepository;
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
