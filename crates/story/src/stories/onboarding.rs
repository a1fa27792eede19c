//! The full onboarding pipeline: 36 steps covering identities, company
//! setup, command lifecycle, orders, products and tables, in the exact
//! order the workflow depends on.

use crate::context::{
    COMMAND_ID, COMPANY_ID, CURRENT_TABLE_ID, INVITE_ALREADY_EMPLOYEE, INVITE_ID, NEW_TABLE_ID,
    PRODUCT_CATEGORY_ID, PRODUCT_IDS, TABLE_IDS, WAITER_EMPLOYEE_ID,
};
use crate::runner::Step;
use crate::steps::{commands, onboarding, orders, products, tables};

pub const STEPS: &[Step] = &[
    Step {
        description: "Authenticate owner with Keycloak",
        reads: &[],
        writes: &[],
        run: onboarding::owner_authentication,
    },
    Step {
        description: "Create owner profile",
        reads: &[],
        writes: &[],
        run: onboarding::owner_profile,
    },
    Step {
        description: "Create restaurant company",
        reads: &[],
        writes: &[COMPANY_ID],
        run: onboarding::create_company,
    },
    Step {
        description: "Seed products and tables",
        reads: &[COMPANY_ID],
        writes: &[PRODUCT_CATEGORY_ID, PRODUCT_IDS, TABLE_IDS, CURRENT_TABLE_ID],
        run: onboarding::seed_products_and_tables,
    },
    Step {
        description: "Invite waiter employee",
        reads: &[COMPANY_ID],
        writes: &[INVITE_ID, INVITE_ALREADY_EMPLOYEE],
        run: onboarding::invite_waiter,
    },
    Step {
        description: "Waiter accepts invite",
        reads: &[COMPANY_ID, INVITE_ID, INVITE_ALREADY_EMPLOYEE],
        writes: &[INVITE_ID],
        run: onboarding::waiter_accepts_invite,
    },
    Step {
        description: "Waiter creates command",
        reads: &[COMPANY_ID],
        writes: &[CURRENT_TABLE_ID, WAITER_EMPLOYEE_ID, COMMAND_ID],
        run: commands::waiter_creates_command,
    },
    Step {
        description: "Waiter adds order to command",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[],
        run: orders::waiter_adds_order,
    },
    Step {
        description: "Owner sets command to PAYING",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::owner_sets_command_paying,
    },
    Step {
        description: "Owner closes command",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::owner_closes_command,
    },
    Step {
        description: "Owner reopens command",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::owner_reopens_command,
    },
    Step {
        description: "Waiter changes command table",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[NEW_TABLE_ID],
        run: commands::waiter_changes_table,
    },
    Step {
        description: "Waiter cannot change to the same table twice",
        reads: &[COMMAND_ID, CURRENT_TABLE_ID],
        writes: &[],
        run: commands::cannot_change_to_same_table_twice,
    },
    Step {
        description: "Waiter cannot change to other company table",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::cannot_change_to_other_company_table,
    },
    Step {
        description: "Waiter cannot change table when command closed",
        reads: &[COMPANY_ID, COMMAND_ID, CURRENT_TABLE_ID],
        writes: &[],
        run: commands::cannot_change_table_when_closed,
    },
    Step {
        description: "Owner cannot reopen open command",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::cannot_reopen_open_command,
    },
    Step {
        description: "Waiter adds more products",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[],
        run: orders::waiter_adds_more_products,
    },
    Step {
        description: "Waiter cannot add products to closed command",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[],
        run: orders::cannot_add_products_to_closed_command,
    },
    Step {
        description: "Waiter adds product with empty notes",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[],
        run: orders::waiter_adds_product_with_empty_notes,
    },
    Step {
        description: "Waiter cannot add nonexistent product",
        reads: &[COMMAND_ID],
        writes: &[],
        run: orders::cannot_add_nonexistent_product,
    },
    Step {
        description: "Waiter cannot add product from other company",
        reads: &[COMMAND_ID],
        writes: &[],
        run: orders::cannot_add_product_from_other_company,
    },
    Step {
        description: "Commands count unauthorized",
        reads: &[],
        writes: &[],
        run: commands::commands_count_unauthorized,
    },
    Step {
        description: "Get command bill data",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::get_bill_data,
    },
    Step {
        description: "Get order by ID",
        reads: &[COMMAND_ID],
        writes: &[],
        run: orders::get_order_by_id,
    },
    Step {
        description: "Update order status",
        reads: &[COMMAND_ID],
        writes: &[],
        run: orders::update_order_status,
    },
    Step {
        description: "Check command fully closed",
        reads: &[COMMAND_ID],
        writes: &[],
        run: commands::check_command_fully_closed,
    },
    Step {
        description: "Remove order",
        reads: &[COMPANY_ID, COMMAND_ID],
        writes: &[],
        run: orders::remove_order,
    },
    Step {
        description: "Update product",
        reads: &[COMPANY_ID, PRODUCT_CATEGORY_ID],
        writes: &[],
        run: products::update_product,
    },
    Step {
        description: "Update product availability",
        reads: &[COMPANY_ID],
        writes: &[],
        run: products::update_product_availability,
    },
    Step {
        description: "Delete product",
        reads: &[COMPANY_ID, PRODUCT_CATEGORY_ID],
        writes: &[],
        run: products::delete_product,
    },
    Step {
        description: "Get table list",
        reads: &[COMPANY_ID],
        writes: &[],
        run: tables::get_table_list,
    },
    Step {
        description: "Get table by ID",
        reads: &[COMPANY_ID],
        writes: &[],
        run: tables::get_table_by_id,
    },
    Step {
        description: "Create tables in bulk",
        reads: &[COMPANY_ID],
        writes: &[],
        run: tables::create_tables_bulk,
    },
    Step {
        description: "Update table",
        reads: &[COMPANY_ID],
        writes: &[],
        run: tables::update_table,
    },
    Step {
        description: "Delete table",
        reads: &[COMPANY_ID],
        writes: &[],
        run: tables::delete_table,
    },
    Step {
        description: "Flow delete table and verify orders getAll",
        reads: &[COMPANY_ID, WAITER_EMPLOYEE_ID],
        writes: &[],
        run: orders::delete_table_then_list_orders,
    },
];
