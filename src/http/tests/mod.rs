//! Router tests driven through `tower::ServiceExt::oneshot`.

mod router_tests;
