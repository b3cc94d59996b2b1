//! Card renderer: pure mapping from an order or operational task to a card.
//!
//! The field matrix:
//!
//! | Condition                                   | Element                          |
//! |---------------------------------------------|----------------------------------|
//! | product display number / name / both        | product label                    |
//! | planned quantity and unit present           | planned quantity line            |
//! | order in progress or completed, task bucket not pending | done / used quantity line |
//! | description flag                            | description line (may be empty)  |
//! | task executes an operation in an order      | order, products, progress bar    |
//! | deep links enabled                          | header and order number as links |
//! | order in progress + cumulated recording, task started | tracking terminal badge |

use std::sync::Arc;

use super::models::{
    Bucket, OperationalTask, Order, OrderState, ProductDisplay, RecordingType, TaskState,
};
use super::navigation::{self, PageLink, TerminalTarget};
use super::translate::Translate;
use super::view::{Element, Node};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render card titles and order references as links to MES detail views.
    pub enable_orders_link: bool,
}

#[derive(Clone)]
pub struct CardRenderer {
    translator: Arc<dyn Translate>,
    options: RenderOptions,
}

impl CardRenderer {
    pub fn new(translator: Arc<dyn Translate>, options: RenderOptions) -> Self {
        Self {
            translator,
            options,
        }
    }

    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    pub fn order_card(&self, order: &Order) -> Element {
        let unit = present(&order.product_unit).unwrap_or_default();
        let mut body = Vec::new();

        if let Some(line) = present(&order.production_line_number) {
            body.extend(self.field("basic.dashboard.orders.productionLineNumber.label", line));
        }

        let product = product_label(
            order.dashboard_show_for_product,
            present(&order.product_number),
            present(&order.product_name),
            false,
        );
        body.extend(self.field(
            "basic.dashboard.orders.product.label",
            product.as_deref().unwrap_or_default(),
        ));

        let planned = order.planned_quantity.filter(|q| *q != 0.0);
        if let Some(planned) = planned
            && present(&order.product_unit).is_some()
        {
            body.push(self.quantity(
                "float-left",
                "basic.dashboard.orders.plannedQuantity.label",
                planned,
                unit,
            ));
        }
        if matches!(order.state, OrderState::InProgress | OrderState::Completed) {
            body.push(self.quantity(
                "float-right",
                "basic.dashboard.orders.doneQuantity.label",
                order.done(),
                unit,
            ));
        }
        if planned.is_some() {
            body.push(Element::new("br").into());
        }

        if let Some(company) = present(&order.company_name) {
            body.extend(self.field("basic.dashboard.orders.companyName.label", company));
        }
        if let Some(master) = present(&order.master_order_number) {
            body.extend(self.field("basic.dashboard.orders.masterOrderNumber.label", master));
        }
        if order.dashboard_show_description {
            body.extend(self.field(
                "basic.dashboard.orders.description.label",
                order.description.as_deref().unwrap_or_default(),
            ));
        }
        if order.state == OrderState::InProgress
            && order.type_of_production_recording == Some(RecordingType::Cumulated)
        {
            body.push(self.terminal_badge(
                "basic.dashboard.orders.showTerminal.label",
                navigation::tracking_terminal(TerminalTarget::Order(order.id)),
            ));
        }

        Element::new("div")
            .class("card draggable")
            .id(format!("order{}", order.id))
            .attr("draggable", "true")
            .child(self.header(&order.number, navigation::order_details(order.id)))
            .child(Element::new("div").class("card-body py-2").children(body))
            .child(progress_footer(order.percent_complete()))
    }

    /// Task cards depend on the bucket they are shown in: the used quantity
    /// only appears outside the pending column.
    pub fn operational_task_card(&self, bucket: Bucket, task: &OperationalTask) -> Element {
        let in_order = task.is_execution_in_order();
        let unit = present(&task.product_unit).unwrap_or_default();
        let mut body = Vec::new();

        body.extend(self.field("basic.dashboard.operationalTasks.name.label", &task.name));

        if in_order && let Some(order_number) = present(&task.order_number) {
            let reference: Node = match task.order_id {
                Some(order_id) if self.options.enable_orders_link => {
                    link(navigation::order_details(order_id), order_number, None).into()
                }
                _ => Element::new("span").text(order_number).into(),
            };
            body.push(self.label("basic.dashboard.operationalTasks.orderNumber.label"));
            body.push(Node::Text(" ".to_string()));
            body.push(reference);
            body.push(Element::new("br").into());
        }

        if let Some(ws) = present(&task.workstation_number) {
            body.extend(self.field("basic.dashboard.operationalTasks.workstationNumber.label", ws));
        }

        if in_order {
            let order_product = product_label(
                task.dashboard_show_for_product,
                present(&task.order_product_number),
                present(&task.order_product_name),
                false,
            );
            body.extend(self.field(
                "basic.dashboard.operationalTasks.orderProduct.label",
                order_product.as_deref().unwrap_or_default(),
            ));

            let product = product_label(
                task.dashboard_show_for_product,
                present(&task.product_number),
                present(&task.product_name),
                true,
            );
            if let Some(product) = product.as_deref().filter(|p| !p.is_empty()) {
                body.extend(self.field("basic.dashboard.operationalTasks.product.label", product));
            }

            let planned = task.planned_quantity.filter(|q| *q != 0.0);
            if let Some(planned) = planned
                && present(&task.product_unit).is_some()
            {
                body.push(self.quantity(
                    "float-left",
                    "basic.dashboard.operationalTasks.plannedQuantity.label",
                    planned,
                    unit,
                ));
            }
            if bucket != Bucket::Pending {
                body.push(self.quantity(
                    "float-right",
                    "basic.dashboard.operationalTasks.usedQuantity.label",
                    task.used(),
                    unit,
                ));
            }
            if planned.is_some() {
                body.push(Element::new("br").into());
            }
        }

        if let Some(staff) = present(&task.staff_name) {
            body.extend(self.field("basic.dashboard.operationalTasks.staffName.label", staff));
        }
        if task.dashboard_show_description {
            body.extend(self.field(
                "basic.dashboard.operationalTasks.description.label",
                task.description.as_deref().unwrap_or_default(),
            ));
        }
        if in_order && task.state == TaskState::Started {
            body.push(self.terminal_badge(
                "basic.dashboard.operationalTasks.showTerminal.label",
                navigation::tracking_terminal(TerminalTarget::OperationalTask {
                    id: task.id,
                    workstation_number: present(&task.workstation_number),
                }),
            ));
        }

        let mut card = Element::new("div")
            .class("card")
            .id(format!("operationalTask{}", task.id))
            .child(self.header(&task.number, navigation::operational_task_details(task.id)))
            .child(Element::new("div").class("card-body py-2").children(body));
        if in_order {
            card = card.child(progress_footer(task.percent_complete()));
        }
        card
    }

    fn header(&self, title: &str, details: PageLink) -> Element {
        let title: Node = if self.options.enable_orders_link {
            link(details, title, Some("card-title text-white")).into()
        } else {
            Element::new("span")
                .class("card-title text-white")
                .text(title)
                .into()
        };
        Element::new("div")
            .class("card-header bg-secondary py-2")
            .child(title)
    }

    fn label(&self, key: &str) -> Node {
        Element::new("span")
            .class("font-weight-bold")
            .text(format!("{}:", self.translator.translate(key)))
            .into()
    }

    /// `Label: value<br>`
    fn field(&self, key: &str, value: &str) -> [Node; 3] {
        [
            self.label(key),
            Node::Text(format!(" {}", value)),
            Element::new("br").into(),
        ]
    }

    fn quantity(&self, float: &str, key: &str, quantity: f64, unit: &str) -> Node {
        Element::new("span")
            .class(float)
            .child(self.label(key))
            .text(format!(" {} {}", format_quantity(quantity), unit))
            .into()
    }

    fn terminal_badge(&self, key: &str, target: PageLink) -> Node {
        link(target, &self.translator.translate(key), Some("badge badge-success float-right"))
            .into()
    }
}

fn link(target: PageLink, text: &str, class: Option<&str>) -> Element {
    let mut a = Element::new("a")
        .attr("href", target.url)
        .attr("data-page", target.is_page.to_string());
    if let Some(class) = class {
        a = a.class(class);
    }
    a.text(text)
}

fn progress_footer(percent: i64) -> Element {
    let bar = Element::new("div")
        .class("progress-bar progress-bar-striped bg-info")
        .attr("role", "progressbar")
        .attr("style", format!("width: {}%;", percent))
        .attr("aria-valuenow", percent.to_string())
        .attr("aria-valuemin", "0")
        .attr("aria-valuemax", "100")
        .text(format!("{}%", percent));
    Element::new("div")
        .class("card-footer")
        .child(Element::new("div").class("progress").child(bar))
}

/// Product text for the display preference.
///
/// With `require_both`, "both" degrades to the number alone unless number
/// and name are both known.
pub fn product_label(
    display: ProductDisplay,
    number: Option<&str>,
    name: Option<&str>,
    require_both: bool,
) -> Option<String> {
    match display {
        ProductDisplay::Name => name.map(str::to_string),
        ProductDisplay::Both => match (number, name) {
            (Some(number), Some(name)) => Some(format!("{}, {}", number, name)),
            _ if require_both => number.map(str::to_string),
            _ => Some(format!(
                "{}, {}",
                number.unwrap_or_default(),
                name.unwrap_or_default()
            )),
        },
        ProductDisplay::Number | ProductDisplay::Unrecognized => number.map(str::to_string),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kanban::testing::{order, task};
    use crate::kanban::translate::MessageBundle;

    fn renderer(enable_orders_link: bool) -> CardRenderer {
        CardRenderer::new(
            Arc::new(MessageBundle::default()),
            RenderOptions { enable_orders_link },
        )
    }

    fn body_text(card: &Element) -> String {
        card.find_by_class("card-body").unwrap().text_content()
    }

    #[test]
    fn test_order_card_identity_and_drag_attributes() {
        let card = renderer(false).order_card(&order(7, "01pending"));
        assert_eq!(card.get_attr("id"), Some("order7"));
        assert_eq!(card.get_attr("draggable"), Some("true"));
        assert!(card.has_class("draggable"));
        let header = card.find_by_class("card-title").unwrap();
        assert_eq!(header.tag(), "span");
        assert_eq!(header.text_content(), "O-7");
    }

    #[test]
    fn test_order_card_deep_link() {
        let card = renderer(true).order_card(&order(7, "01pending"));
        let header = card.find_by_class("card-title").unwrap();
        assert_eq!(header.tag(), "a");
        assert!(header.get_attr("href").unwrap().starts_with("orders/orderDetails.html"));
    }

    #[test]
    fn test_product_display_variants() {
        let mut o = order(1, "01pending");
        assert!(body_text(&renderer(false).order_card(&o)).contains("Product: P-1"));

        o.dashboard_show_for_product = ProductDisplay::Name;
        assert!(body_text(&renderer(false).order_card(&o)).contains("Product: Product 1"));

        o.dashboard_show_for_product = ProductDisplay::Both;
        assert!(body_text(&renderer(false).order_card(&o)).contains("Product: P-1, Product 1"));
    }

    #[test]
    fn test_both_label_is_number_comma_name() {
        assert_eq!(
            product_label(ProductDisplay::Both, Some("N"), Some("M"), false).as_deref(),
            Some("N, M")
        );
        assert_eq!(
            product_label(ProductDisplay::Both, Some("N"), Some("M"), true).as_deref(),
            Some("N, M")
        );
        assert_eq!(
            product_label(ProductDisplay::Both, Some("N"), None, true).as_deref(),
            Some("N")
        );
        assert_eq!(
            product_label(ProductDisplay::Both, Some("N"), None, false).as_deref(),
            Some("N, ")
        );
    }

    #[test]
    fn test_done_quantity_only_after_start() {
        let pending = body_text(&renderer(false).order_card(&order(1, "01pending")));
        assert!(pending.contains("Planned quantity: 100 pcs"));
        assert!(!pending.contains("Done quantity"));

        let started = body_text(&renderer(false).order_card(&order(1, "03inProgress")));
        assert!(started.contains("Done quantity: 0 pcs"));

        let done = body_text(&renderer(false).order_card(&order(1, "04completed")));
        assert!(done.contains("Done quantity"));
    }

    #[test]
    fn test_planned_line_needs_unit() {
        let mut o = order(1, "01pending");
        o.product_unit = None;
        assert!(!body_text(&renderer(false).order_card(&o)).contains("Planned quantity"));
    }

    #[test]
    fn test_description_line_uses_empty_string() {
        let mut o = order(1, "01pending");
        o.dashboard_show_description = true;
        let text = body_text(&renderer(false).order_card(&o));
        assert!(text.contains("Description: "));

        o.dashboard_show_description = false;
        o.description = Some("hidden".into());
        assert!(!body_text(&renderer(false).order_card(&o)).contains("hidden"));
    }

    #[test]
    fn test_terminal_badge_for_cumulated_orders_in_progress() {
        let mut o = order(3, "03inProgress");
        o.type_of_production_recording = Some(RecordingType::Cumulated);
        let card = renderer(false).order_card(&o);
        let badge = card.find_by_class("badge").unwrap();
        assert_eq!(
            badge.get_attr("href"),
            Some("/productionRegistrationTerminal.html?orderId=3")
        );

        o.type_of_production_recording = Some(RecordingType::ForEach);
        assert!(renderer(false).order_card(&o).find_by_class("badge").is_none());
    }

    #[test]
    fn test_progress_bar_percent() {
        let mut o = order(1, "03inProgress");
        o.done_quantity = Some(33.4);
        let card = renderer(false).order_card(&o);
        let bar = card.find_by_class("progress-bar").unwrap();
        assert_eq!(bar.get_attr("aria-valuenow"), Some("33"));
        assert_eq!(bar.get_attr("style"), Some("width: 33%;"));
        assert_eq!(bar.text_content(), "33%");
    }

    #[test]
    fn test_progress_bar_with_zero_planned() {
        let mut o = order(1, "03inProgress");
        o.planned_quantity = Some(0.0);
        o.done_quantity = Some(5.0);
        let card = renderer(false).order_card(&o);
        assert_eq!(card.find_by_class("progress-bar").unwrap().text_content(), "0%");
    }

    #[test]
    fn test_task_card_is_not_draggable() {
        let card = renderer(false).operational_task_card(Bucket::Pending, &task(4, "01pending"));
        assert_eq!(card.get_attr("id"), Some("operationalTask4"));
        assert!(card.get_attr("draggable").is_none());
        assert!(!card.has_class("draggable"));
    }

    #[test]
    fn test_task_used_quantity_depends_on_bucket() {
        let t = task(4, "02started");
        let pending = body_text(&renderer(false).operational_task_card(Bucket::Pending, &t));
        assert!(!pending.contains("Used quantity"));
        let started = body_text(&renderer(false).operational_task_card(Bucket::InProgress, &t));
        assert!(started.contains("Used quantity: 4 pcs"));
    }

    #[test]
    fn test_task_in_order_shows_order_and_progress() {
        let card = renderer(false).operational_task_card(Bucket::InProgress, &task(4, "02started"));
        let text = body_text(&card);
        assert!(text.contains("Order: O-104"));
        assert!(text.contains("Order product: OP-1"));
        assert!(text.contains("Product: P-1"));
        assert_eq!(card.find_by_class("progress-bar").unwrap().text_content(), "40%");
        let badge = card.find_by_class("badge").unwrap();
        assert_eq!(
            badge.get_attr("href"),
            Some("/productionRegistrationTerminal.html?operationalTaskId=4&workstationNumber=WS-1")
        );
    }

    #[test]
    fn test_other_task_type_has_no_order_section() {
        let mut t = task(4, "02started");
        t.task_type = crate::kanban::models::TaskType::OtherCase;
        let card = renderer(false).operational_task_card(Bucket::InProgress, &t);
        let text = body_text(&card);
        assert!(text.contains("Name: Task 4"));
        assert!(text.contains("Workstation: WS-1"));
        assert!(!text.contains("Order:"));
        assert!(card.find_by_class("progress").is_none());
        assert!(card.find_by_class("badge").is_none());
    }

    #[test]
    fn test_task_order_reference_links_when_enabled() {
        let card = renderer(true).operational_task_card(Bucket::Pending, &task(4, "01pending"));
        let html = card.to_html();
        assert!(html.contains("orders/operationalTaskDetails.html"));
        assert!(html.contains("orders/orderDetails.html?context=%7B%22form.id%22%3A104"));
    }

    #[test]
    fn test_task_product_both_requires_both_parts() {
        let mut t = task(4, "01pending");
        t.dashboard_show_for_product = ProductDisplay::Both;
        t.product_name = None;
        t.order_product_name = None;
        let text = body_text(&renderer(false).operational_task_card(Bucket::Pending, &t));
        assert!(text.contains("Product: P-1"));
        assert!(text.contains("Order product: OP-1, "));
    }

    #[test]
    fn test_entity_text_is_escaped() {
        let mut o = order(1, "01pending");
        o.number = "<b>O-1</b>".into();
        let html = renderer(false).order_card(&o).to_html();
        assert!(html.contains("&lt;b&gt;O-1&lt;/b&gt;"));
    }
}
