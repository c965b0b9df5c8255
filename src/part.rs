//! Parts: named collections of nodes, beam elements, materials and sections.

use log::debug;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::element::BeamElement;
use crate::errors::PartError;
use crate::geometry::Point;
use crate::material::ElasticIsotropic;
use crate::section::Section;
use crate::units::UnitSystem;

/// Index of a material inside a [`Part`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(usize);

impl MaterialId {
    /// Wrap a raw material index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a section inside a [`Part`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(usize);

impl SectionId {
    /// Wrap a raw section index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A node of a part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Node {
    /// Position of the node in model length units.
    position: Point,
}

/// Deformable part made of beam elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Part {
    /// Name of the part, unique within a model.
    name: String,
    /// Nodes and the beam elements connecting them.
    graph: Graph<Node, BeamElement>,
    /// Materials referenced by sections.
    materials: Vec<ElasticIsotropic>,
    /// Sections referenced by elements.
    sections: Vec<Section>,
}

impl Part {
    /// Create an empty part.
    ///
    /// # Examples
    /// ```
    /// use framex::Part;
    ///
    /// let part = Part::new("frame_part");
    /// assert_eq!(part.node_count(), 0);
    /// assert_eq!(part.name(), "frame_part");
    /// ```
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            graph: Graph::new(),
            materials: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Name of the part.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the number of nodes in the part.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of elements in the part.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node at `position`.
    ///
    /// Nodes are not merged by position; see [`Part::duplicate_nodes`].
    pub fn add_node(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(Node { position })
    }

    /// Add several nodes, returning their indices in input order.
    ///
    /// # Examples
    /// ```
    /// use framex::{point, Part};
    ///
    /// let mut part = Part::new("frame_part");
    /// let nodes = part.add_nodes([point(0.0, 0.0, 0.0), point(100.0, 0.0, 0.0)]);
    /// assert_eq!(nodes.len(), 2);
    /// assert_eq!(part.node_count(), 2);
    /// ```
    pub fn add_nodes(&mut self, positions: impl IntoIterator<Item = Point>) -> Vec<NodeIndex> {
        let nodes: Vec<NodeIndex> = positions
            .into_iter()
            .map(|position| self.add_node(position))
            .collect();
        debug!("part '{}': added {} nodes", self.name, nodes.len());
        nodes
    }

    /// Register a material.
    pub fn add_material(&mut self, material: ElasticIsotropic) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Register a section.
    ///
    /// # Errors
    ///
    /// Returns [`PartError::UnknownMaterial`] when the section's material is not
    /// registered in this part.
    pub fn add_section(&mut self, section: Section) -> Result<SectionId, PartError> {
        if self.material(section.material()).is_none() {
            return Err(PartError::UnknownMaterial(section.material()));
        }
        self.sections.push(section);
        Ok(SectionId(self.sections.len() - 1))
    }

    /// Connect two nodes with a beam element of the given section.
    ///
    /// # Errors
    ///
    /// Returns [`PartError::UnknownNode`] or [`PartError::UnknownSection`] for
    /// dangling references, [`PartError::SelfConnectedElement`] when `start`
    /// equals `end` and [`PartError::ZeroLengthElement`] when both nodes share
    /// a position.
    pub fn add_element(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        section: SectionId,
    ) -> Result<EdgeIndex, PartError> {
        self.add_beam(start, end, BeamElement::new(section))
    }

    /// Connect two nodes with a fully specified beam element.
    ///
    /// # Errors
    ///
    /// Same as [`Part::add_element`].
    pub fn add_beam(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        beam: BeamElement,
    ) -> Result<EdgeIndex, PartError> {
        self.check_beam(start, end, &beam)?;
        Ok(self.graph.add_edge(start, end, beam))
    }

    /// Rules shared by [`Part::add_beam`] and [`Part::validate`].
    fn check_beam(
        &self,
        start: NodeIndex,
        end: NodeIndex,
        beam: &BeamElement,
    ) -> Result<(), PartError> {
        let a = self
            .node_position(start)
            .ok_or(PartError::UnknownNode(start))?;
        let b = self.node_position(end).ok_or(PartError::UnknownNode(end))?;
        if self.section(beam.section()).is_none() {
            return Err(PartError::UnknownSection(beam.section()));
        }
        if start == end {
            return Err(PartError::SelfConnectedElement(start));
        }
        if a.distance_to(b) == 0.0 {
            return Err(PartError::ZeroLengthElement { start, end });
        }
        Ok(())
    }

    /// Re-check every material, section and element against the rules the
    /// editing methods enforce. Used on parts that were not built through them,
    /// such as decoded model files.
    ///
    /// # Errors
    ///
    /// Returns the first violation as a [`PartError`].
    pub fn validate(&self) -> Result<(), PartError> {
        for material in &self.materials {
            material.validate()?;
        }
        for section in &self.sections {
            section.validate()?;
            if self.material(section.material()).is_none() {
                return Err(PartError::UnknownMaterial(section.material()));
            }
        }
        for (_, start, end, beam) in self.elements() {
            self.check_beam(start, end, beam)?;
        }
        Ok(())
    }

    /// Position of a node.
    #[must_use]
    pub fn node_position(&self, node: NodeIndex) -> Option<Point> {
        self.graph.node_weight(node).map(|node| node.position)
    }

    /// Whether `node` belongs to this part.
    #[must_use]
    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.graph.node_weight(node).is_some()
    }

    /// Start and end node of an element.
    #[must_use]
    pub fn element_nodes(&self, element: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(element)
    }

    /// Beam data of an element.
    #[must_use]
    pub fn element(&self, element: EdgeIndex) -> Option<&BeamElement> {
        self.graph.edge_weight(element)
    }

    /// Length of an element in model length units.
    #[must_use]
    pub fn element_length(&self, element: EdgeIndex) -> Option<f64> {
        let (start, end) = self.element_nodes(element)?;
        Some(self.node_position(start)?.distance_to(self.node_position(end)?))
    }

    /// Look up a material.
    #[must_use]
    pub fn material(&self, material: MaterialId) -> Option<&ElasticIsotropic> {
        self.materials.get(material.0)
    }

    /// Look up a section.
    #[must_use]
    pub fn section(&self, section: SectionId) -> Option<&Section> {
        self.sections.get(section.0)
    }

    /// Iterate over nodes and their positions.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, Point)> + '_ {
        self.graph
            .node_indices()
            .map(move |index| (index, self.graph[index].position))
    }

    /// Iterate over elements with their start and end nodes.
    pub fn elements(
        &self,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &BeamElement)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |index| {
                let (start, end) = self.graph.edge_endpoints(index)?;
                Some((index, start, end, &self.graph[index]))
            })
    }

    /// Iterate over registered materials.
    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &ElasticIsotropic)> + '_ {
        self.materials
            .iter()
            .enumerate()
            .map(|(index, material)| (MaterialId(index), material))
    }

    /// Iterate over registered sections.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> + '_ {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, section)| (SectionId(index), section))
    }

    /// Find every node within `distance` of `target` (inclusive), in node order.
    ///
    /// An empty result is not an error here; callers decide whether it is.
    ///
    /// # Examples
    /// ```
    /// use framex::{point, Part};
    ///
    /// let mut part = Part::new("frame_part");
    /// let nodes = part.add_nodes([point(0.0, 0.0, 0.0), point(500.0, 0.0, 0.0)]);
    /// let found = part.find_nodes_around_point(point(500.0, 0.0, 0.0), 0.1);
    /// assert_eq!(found, vec![nodes[1]]);
    /// ```
    #[must_use]
    pub fn find_nodes_around_point(&self, target: Point, distance: f64) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, position)| position.distance_to(target) <= distance)
            .map(|(index, _)| index)
            .collect()
    }

    /// Node closest to `target`, if the part has any nodes.
    #[must_use]
    pub fn find_closest_node(&self, target: Point) -> Option<NodeIndex> {
        self.nodes()
            .map(|(index, position)| (index, position.distance_to(target)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Pairs of distinct nodes closer than `tolerance` to each other.
    #[must_use]
    pub fn duplicate_nodes(&self, tolerance: f64) -> Vec<(NodeIndex, NodeIndex)> {
        let nodes: Vec<(NodeIndex, Point)> = self.nodes().collect();
        let mut pairs = Vec::new();
        for (i, (a, pa)) in nodes.iter().enumerate() {
            for (b, pb) in &nodes[i + 1..] {
                if pa.distance_to(*pb) <= tolerance {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }

    /// Nodes that no element is attached to.
    #[must_use]
    pub fn unconnected_nodes(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&node| self.graph.neighbors_undirected(node).next().is_none())
            .collect()
    }

    /// Total mass of all elements (density × area × length) in `units`.
    #[must_use]
    pub fn mass(&self, units: UnitSystem) -> f64 {
        self.elements()
            .filter_map(|(index, _, _, beam)| {
                let section = self.section(beam.section())?;
                let material = self.material(section.material())?;
                let length = self.element_length(index)?;
                Some(units.density(material.density()) * section.properties(units).area * length)
            })
            .sum()
    }
}
