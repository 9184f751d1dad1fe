/// Generate one `#[tokio::test]` per CRUD suite for a resource.
///
/// ```ignore
/// crud_contract::crud_contract_tests!(assets_contract, "Asset", admin_router);
/// crud_contract::crud_contract_tests!(
///     people_contract,
///     "Person",
///     admin_router,
///     config = ContractConfig::from_env()
/// );
/// ```
///
/// The calling crate needs `tokio` (with `macros` and `rt`) as a dev-dependency.
#[macro_export]
macro_rules! crud_contract_tests {
    ($module:ident, $resource:expr, $router:expr) => {
        $crate::crud_contract_tests!(
            $module,
            $resource,
            $router,
            config = $crate::ContractConfig::default()
        );
    };
    ($module:ident, $resource:expr, $router:expr, config = $config:expr) => {
        mod $module {
            #[allow(unused_imports)]
            use super::*;

            fn target() -> $crate::ContractTarget {
                $crate::ContractTarget::for_router($resource, $config, $router)
                    .expect("contract target")
            }

            #[::tokio::test]
            async fn crud_get_index() {
                $crate::suites::index::run(&target()).await.assert_passed();
            }

            #[::tokio::test]
            async fn crud_get_show() {
                $crate::suites::show::run(&target()).await.assert_passed();
            }

            #[::tokio::test]
            async fn crud_post_create() {
                $crate::suites::create::run(&target()).await.assert_passed();
            }

            #[::tokio::test]
            async fn crud_put_update() {
                $crate::suites::update::run(&target()).await.assert_passed();
            }

            #[::tokio::test]
            async fn crud_delete_destroy() {
                $crate::suites::destroy::run(&target()).await.assert_passed();
            }

            #[::tokio::test]
            async fn crud_get_edit() {
                $crate::suites::edit::run(&target()).await.assert_passed();
            }
        }
    };
}
