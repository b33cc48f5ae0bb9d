use crate::server::ServerRouter;

mod comments;
mod posts;
mod session;
mod summaries;
mod users;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(posts::routes())
        .merge(comments::routes())
        .merge(summaries::routes())
        .merge(session::routes())
        .merge(users::routes())
}
