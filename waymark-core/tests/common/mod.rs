//! Shared route fixtures for the integration tests.

#![allow(dead_code)]

use waymark_core::{Router, RouterConfig, RouteNode, route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Home,
    Articles,
    Articles2020,
    ArticleCategories,
    Category,
    Newest,
    Year,
    Month,
    Day,
    PopularArticles,
    Int,
    Uuid,
    Catchall,
}

pub const CATCHALL: &str = "<re:(?P<catched>^[a-z]*$)>";

pub fn article_routes() -> Vec<RouteNode<Handler>> {
    vec![
        route("2020/")
            .handler(Handler::Articles2020)
            .name("articles-2020")
            .build()
            .unwrap(),
        route("categories/")
            .handler(Handler::ArticleCategories)
            .name("categories")
            .subroute(
                route("<str:category>")
                    .handler(Handler::Category)
                    .subroute(
                        route("newest/")
                            .handler(Handler::Newest)
                            .name("newest-in-category")
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap(),
        route("<int:year>/")
            .handler(Handler::Year)
            .name("articles-year")
            .subroutes([
                route("<int:month>/")
                    .handler(Handler::Month)
                    .name("articles-year-month")
                    .subroute(
                        route("<int:day>/")
                            .handler(Handler::Day)
                            .name("articles-year-month-day")
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
                route("popular")
                    .handler(Handler::PopularArticles)
                    .name("popular-articles")
                    .build()
                    .unwrap(),
            ])
            .build()
            .unwrap(),
    ]
}

pub fn user_routes() -> Vec<RouteNode<Handler>> {
    vec![
        route("extra/")
            .handler(Handler::Home)
            .name("users-extra")
            .build()
            .unwrap(),
        route("<re:^[a-z0-9]+(?:-[a-z0-9]+)*$>")
            .handler(Handler::Home)
            .name("users-slug")
            .build()
            .unwrap(),
    ]
}

pub fn routes() -> Vec<RouteNode<Handler>> {
    vec![
        route("/").handler(Handler::Home).name("home").build().unwrap(),
        route("articles/")
            .handler(Handler::Articles)
            .name("articles_routes")
            .subroutes(article_routes())
            .build()
            .unwrap(),
        route("users/")
            .name("users_routes")
            .subroutes(user_routes())
            .build()
            .unwrap(),
        route("int/<int:id>")
            .handler(Handler::Int)
            .name("int")
            .build()
            .unwrap(),
        route("items/<uuid:id>")
            .handler(Handler::Uuid)
            .name("items")
            .build()
            .unwrap(),
        route(format!("{}/catch/", CATCHALL))
            .handler(Handler::Catchall)
            .name("catchall")
            .build()
            .unwrap(),
    ]
}

pub fn router() -> Router<Handler> {
    Router::new(routes()).unwrap()
}

pub fn router_with(config: RouterConfig) -> Router<Handler> {
    Router::with_config(routes(), config).unwrap()
}
