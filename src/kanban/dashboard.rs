use std::sync::Arc;

use super::client::KanbanClient;
use super::document::{BoardDocument, Card, CardId, DropTarget};
use super::dragdrop::{self, DragDropController, DropOutcome};
use super::dropzones::update_dropzones;
use super::fetcher::{LoadReport, load_board};
use super::models::{Bucket, ContainerId, OperationalTask, Order};
use super::notify::Notifier;
use super::render::{CardRenderer, RenderOptions};
use super::store::BoardState;
use super::translate::Translate;
use super::view::escape_attr;

const PAGE_STYLE: &str = include_str!("../../assets/board.css");
const PAGE_SCRIPT: &str = include_str!("../../assets/board.js");

/// One board: the bucket store, the rendered document and the controller
/// that keeps them in step.
pub struct Dashboard {
    state: BoardState,
    document: BoardDocument,
    client: Arc<dyn KanbanClient>,
    controller: DragDropController,
    renderer: CardRenderer,
    mes_url: Option<String>,
}

impl Dashboard {
    pub fn new(
        client: Arc<dyn KanbanClient>,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translate>,
        options: RenderOptions,
    ) -> Self {
        let renderer = CardRenderer::new(translator, options);
        let controller = DragDropController::new(client.clone(), notifier, renderer.clone());
        let mut document = BoardDocument::new();
        update_dropzones(&mut document);
        Self {
            state: BoardState::new(),
            document,
            client,
            controller,
            renderer,
            mes_url: None,
        }
    }

    /// MES root that card links resolve against when the page is opened
    /// outside the MES frame.
    pub fn with_mes_url(mut self, url: impl Into<String>) -> Self {
        self.mes_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Fetch all six buckets and re-render the board from the store.
    pub async fn load(&mut self) -> LoadReport {
        let report = load_board(self.client.as_ref(), &mut self.state).await;
        self.render_all();
        if report.is_complete() {
            tracing::info!(
                orders = Bucket::ALL.iter().map(|b| self.state.orders(*b).len()).sum::<usize>(),
                operational_tasks = Bucket::ALL
                    .iter()
                    .map(|b| self.state.operational_tasks(*b).len())
                    .sum::<usize>(),
                "board loaded"
            );
        }
        report
    }

    /// Rebuild every column from the store, in bucket order.
    pub fn render_all(&mut self) {
        self.document.clear();
        for bucket in Bucket::ALL {
            for order in self.state.orders(bucket).values() {
                self.document
                    .append_card(ContainerId::orders(bucket), order_card(&self.renderer, order));
            }
            for task in self.state.operational_tasks(bucket).values() {
                self.document.append_card(
                    ContainerId::tasks(bucket),
                    task_card(&self.renderer, bucket, task),
                );
            }
        }
        update_dropzones(&mut self.document);
    }

    pub fn append_order(&mut self, bucket: Bucket, order: Order) {
        self.add_order(bucket, order, false);
    }

    pub fn prepend_order(&mut self, bucket: Bucket, order: Order) {
        self.add_order(bucket, order, true);
    }

    pub fn append_operational_task(&mut self, bucket: Bucket, task: OperationalTask) {
        self.add_operational_task(bucket, task, false);
    }

    pub fn prepend_operational_task(&mut self, bucket: Bucket, task: OperationalTask) {
        self.add_operational_task(bucket, task, true);
    }

    fn add_order(&mut self, bucket: Bucket, order: Order, front: bool) {
        let card = order_card(&self.renderer, &order);
        // a re-added order replaces its old card
        let _ = self.document.remove_card(card.id);
        let container = ContainerId::orders(bucket);
        if front {
            self.document.prepend_card(container, card);
        } else {
            self.document.append_card(container, card);
        }
        for other in Bucket::ALL {
            self.state.orders_mut(other).shift_remove(&order.id);
        }
        self.state.insert_order(bucket, order, front);
        update_dropzones(&mut self.document);
    }

    fn add_operational_task(&mut self, bucket: Bucket, task: OperationalTask, front: bool) {
        let card = task_card(&self.renderer, bucket, &task);
        let _ = self.document.remove_card(card.id);
        let container = ContainerId::tasks(bucket);
        if front {
            self.document.prepend_card(container, card);
        } else {
            self.document.append_card(container, card);
        }
        for other in Bucket::ALL {
            self.state.operational_tasks_mut(other).shift_remove(&task.id);
        }
        self.state.insert_operational_task(bucket, task, front);
        update_dropzones(&mut self.document);
    }

    pub fn allow_drop(&mut self, dragged: CardId, target: DropTarget) -> bool {
        dragdrop::allow_drop(&mut self.document, dragged, target)
    }

    pub fn clear_drop(&mut self, target: DropTarget) {
        dragdrop::clear_drop(&mut self.document, target);
    }

    pub async fn drop_card(&mut self, dragged: CardId, target: DropTarget) -> DropOutcome {
        self.controller
            .drop_card(&mut self.state, &mut self.document, dragged, target)
            .await
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn document(&self) -> &BoardDocument {
        &self.document
    }

    /// The board markup alone, as swapped in after a drop.
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    /// A standalone page: board markup plus the stylesheet and the script
    /// that forwards drag gestures to `/api/drops`.
    pub fn page_html(&self) -> String {
        let body = match &self.mes_url {
            Some(url) => format!("<body data-mes-url=\"{}\">", escape_attr(url)),
            None => "<body>".to_string(),
        };
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Dashboard</title>\n<style>\n{}</style>\n</head>\n{}\n{}\n<script>\n{}</script>\n</body>\n</html>\n",
            PAGE_STYLE,
            body,
            self.to_html(),
            PAGE_SCRIPT
        )
    }
}

fn order_card(renderer: &CardRenderer, order: &Order) -> Card {
    Card {
        id: CardId::Order(order.id),
        element: renderer.order_card(order),
    }
}

fn task_card(renderer: &CardRenderer, bucket: Bucket, task: &OperationalTask) -> Card {
    Card {
        id: CardId::OperationalTask(task.id),
        element: renderer.operational_task_card(bucket, task),
    }
}
