//! 產品 → 資源流程圖（Graphviz DOT 輸出）

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rust_decimal::Decimal;
use toc_calc::LoadAnalysis;
use toc_core::Catalog;

use crate::{IoError, Result};

/// 節點基準尺寸（英吋）
const BASE_SIZE: f64 = 1.0;

/// 流程圖節點
#[derive(Debug, Clone, PartialEq)]
pub enum GraphNode {
    Product {
        product_id: String,
        unit_throughput: Decimal,
    },
    Resource {
        resource_id: String,
        capacity: f64,
        consumption: f64,
        load_factor: f64,
    },
}

impl GraphNode {
    /// DOT 節點屬性：資源尺寸隨負荷係數縮放，超載為紅色
    fn dot_attributes(&self) -> String {
        match self {
            GraphNode::Product {
                unit_throughput, ..
            } => format!(
                "label=\"{}\", tooltip=\"T: {:.2}\", shape=box, style=filled, fillcolor=yellow, width={:.2}",
                self,
                unit_throughput,
                BASE_SIZE / 2.0
            ),
            GraphNode::Resource {
                capacity,
                consumption,
                load_factor,
                ..
            } => {
                let size = (BASE_SIZE * load_factor).max(BASE_SIZE / 2.0);
                let color = if *load_factor > 1.0 { "red" } else { "skyblue" };
                format!(
                    "label=\"{}\", tooltip=\"{:.2} / {:.2}\", shape=circle, style=filled, fillcolor={}, width={:.2}, fixedsize=true",
                    self, consumption, capacity, color, size
                )
            }
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::Product { product_id, .. } => write!(f, "{}", product_id),
            GraphNode::Resource {
                resource_id,
                load_factor,
                ..
            } => write!(f, "{}\\nLoad: {:.2}", resource_id, load_factor),
        }
    }
}

/// 流程圖：產品 → 資源，邊權重為原始耗用（需求 × 單位耗用時間）
#[derive(Debug, Clone)]
pub struct ProcessGraph {
    graph: DiGraph<GraphNode, f64>,
    max_load_factor: f64,
}

impl ProcessGraph {
    /// 由目錄與負荷分析建立流程圖
    pub fn build(catalog: &Catalog, loads: &LoadAnalysis) -> Result<Self> {
        let mut graph = DiGraph::new();
        let mut resource_nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for load in &loads.loads {
            let index = graph.add_node(GraphNode::Resource {
                resource_id: load.resource_id.clone(),
                capacity: load.capacity,
                consumption: load.consumption,
                load_factor: load.load_factor,
            });
            resource_nodes.insert(load.resource_id.as_str(), index);
        }

        for product in &catalog.products {
            let product_node = graph.add_node(GraphNode::Product {
                product_id: product.product_id.clone(),
                unit_throughput: product.unit_throughput(),
            });

            for (resource_id, &time_per_unit) in &product.resource_usage {
                let resource_node = resource_nodes.get(resource_id.as_str()).ok_or_else(|| {
                    IoError::InvalidDataset(format!(
                        "產品 {} 引用了未定義的資源: {}",
                        product.product_id, resource_id
                    ))
                })?;
                graph.add_edge(product_node, *resource_node, product.demand * time_per_unit);
            }
        }

        Ok(Self {
            graph,
            max_load_factor: loads.max_load_factor,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// 輸出 Graphviz DOT
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph toc {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str(&format!(
            "    label=\"TOC Process Diagram - Max Load: {:.2}\";\n",
            self.max_load_factor
        ));
        out.push_str("    labelloc=t;\n");

        for index in self.graph.node_indices() {
            out.push_str(&format!(
                "    n{} [{}];\n",
                index.index(),
                self.graph[index].dot_attributes()
            ));
        }

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    n{} -> n{} [color=gray, label=\"{:.2}\"];\n",
                edge.source().index(),
                edge.target().index(),
                edge.weight()
            ));
        }

        out.push_str("}\n");
        out
    }

    /// 將 DOT 寫入檔案
    pub fn save_dot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_dot())?;
        tracing::info!(
            "流程圖已輸出: {} (節點 {} 個，邊 {} 條)",
            path.as_ref().display(),
            self.node_count(),
            self.edge_count()
        );
        Ok(())
    }
}
