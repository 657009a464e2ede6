use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        accounting::{CreateEntryRequest, EntryList},
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        branches::{BranchList, CreateBranchRequest, UpdateBranchRequest},
        catalog::{
            BrandList, CreateBrandRequest, CreateModelRequest, CreatePartRequest, ModelList,
            PartList,
        },
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        orders::{
            CreateOrderRequest, NewOrderItem, NewOrderPart, OrderList, ScanResult,
            UpdateOrderRequest, UpdateOrderStatusRequest,
        },
        users::UserList,
    },
    models::{
        AccountingEntry, AccountingSummary, Branch, Brand, Customer, DeviceModel, Order,
        OrderItem, OrderPart, Part, User,
    },
    response::{ApiResponse, Meta},
    routes::{accounting, auth, branches, catalog, customers, health, orders, params, users},
    workflow::status::OrderStatus,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::ping,
        auth::register,
        auth::login,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::update_status,
        orders::resolve_by_scan,
        customers::list_customers,
        customers::search_customers,
        customers::find_by_phone,
        customers::create_customer,
        customers::update_customer,
        customers::customer_orders,
        branches::list_branches,
        branches::get_branch,
        branches::create_branch,
        branches::update_branch,
        catalog::list_brands,
        catalog::create_brand,
        catalog::list_models,
        catalog::create_model,
        catalog::list_parts,
        catalog::create_part,
        accounting::list_entries,
        accounting::create_entry,
        accounting::branch_summary,
        users::current_user,
        users::list_users
    ),
    components(
        schemas(
            User,
            Customer,
            Branch,
            Order,
            OrderItem,
            OrderPart,
            OrderStatus,
            Brand,
            DeviceModel,
            Part,
            AccountingEntry,
            AccountingSummary,
            RegisterRequest,
            LoginRequest,
            RegisterResponse,
            LoginResponse,
            CreateOrderRequest,
            NewOrderItem,
            NewOrderPart,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            ScanResult,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            CreateBranchRequest,
            UpdateBranchRequest,
            BranchList,
            CreateBrandRequest,
            CreateModelRequest,
            CreatePartRequest,
            BrandList,
            ModelList,
            PartList,
            CreateEntryRequest,
            EntryList,
            UserList,
            health::PingData,
            params::Pagination,
            params::OrderListQuery,
            params::CustomerListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<ScanResult>,
            ApiResponse<Customer>,
            ApiResponse<CustomerList>,
            ApiResponse<BranchList>,
            ApiResponse<AccountingSummary>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Orders", description = "Repair order and scan workflow endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Branches", description = "Branch endpoints"),
        (name = "Catalog", description = "Brand, model and part catalog endpoints"),
        (name = "Accounting", description = "Accounting endpoints"),
        (name = "Users", description = "User endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
