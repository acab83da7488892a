//! Graphs: a titled point set with an optional regression
//!
//! A graph lives in two forms:
//! - [`Graph`] is the live form. It may hold a [`RegressionModel`] that can be fitted.
//! - [`GraphRecord`] is the persisted form. It carries only the model's name, never the model.
//!
//! [`Graph::to_record`] goes one way and [`rehydrate`] the other. A rehydrated
//! graph rebuilds its model from the persisted name and points; an unknown
//! name is logged and leaves the graph without a regression.
//!
//! # Example
//! ```rust
//! # use graphfit::{Graph, RegressionKind, graph::rehydrate, test::sample};
//! let points = sample(|x| x * x, -2.0, 2.0, 1.0);
//! let mut graph = Graph::new("Parabola", points, &[] as &[String]).unwrap();
//! graph.set_regression_kind(RegressionKind::Quadratic).unwrap();
//!
//! let record = graph.to_record();
//! assert_eq!(record.model_name, "Quadratic");
//!
//! let restored = rehydrate(record);
//! assert_eq!(restored.regression().map(|m| m.kind()), Some(RegressionKind::Quadratic));
//! ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    id::allocate_id,
    kind::RegressionKind,
    model::{FitResult, RegressionModel},
    range::FitRange,
    value::Point,
};

/// The persisted form of a [`Graph`].
///
/// Serializes with camel-case keys:
/// `id, title, points, modelName, connectPoints, timeStamp, imagePath`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRecord {
    /// Unique id, assigned at creation
    pub id: String,

    /// Display title
    pub title: String,

    /// Observed points
    pub points: Vec<Point>,

    /// Name of the regression kind, e.g. `Quadratic` or `None`
    pub model_name: String,

    /// Whether the renderer joins the raw points with lines
    pub connect_points: bool,

    /// Creation time, written as RFC 3339
    pub time_stamp: DateTime<Utc>,

    /// Path of the last exported image, empty if none
    #[serde(default)]
    pub image_path: String,
}

/// A live graph.
///
/// `id` and creation time are fixed at construction. The persisted model name
/// only changes through [`Graph::set_regression`], [`Graph::set_regression_kind`]
/// and [`Graph::clear_regression`].
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    id: String,
    title: String,
    points: Vec<Point>,
    model_name: String,
    regression: Option<RegressionModel>,
    connect_points: bool,
    created_at: DateTime<Utc>,
    image_path: String,
}
impl Graph {
    /// Creates a new graph stamped with the current time.
    ///
    /// `existing_ids` are the ids already persisted; the new id is guaranteed
    /// not to be among them.
    ///
    /// # Errors
    /// Returns [`Error::IdCollision`] if no free id could be allocated.
    pub fn new<S: AsRef<str>>(
        title: impl Into<String>,
        points: impl Into<Vec<Point>>,
        existing_ids: &[S],
    ) -> Result<Self> {
        Self::with_timestamp(title, points, Utc::now(), existing_ids)
    }

    /// Creates a new graph with an explicit creation time.
    ///
    /// # Errors
    /// Returns [`Error::IdCollision`] if no free id could be allocated.
    pub fn with_timestamp<S: AsRef<str>>(
        title: impl Into<String>,
        points: impl Into<Vec<Point>>,
        now: DateTime<Utc>,
        existing_ids: &[S],
    ) -> Result<Self> {
        let title = title.into();
        let id = allocate_id(&title, now, existing_ids)?;

        Ok(Self {
            id,
            title,
            points: points.into(),
            model_name: RegressionKind::None.name().to_string(),
            regression: None,
            connect_points: false,
            created_at: now,
            image_path: String::new(),
        })
    }

    /// The graph's unique id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The observed points
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The persisted model name
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The regression kind, or `None` if the persisted name is not recognised
    #[must_use]
    pub fn kind(&self) -> Option<RegressionKind> {
        self.model_name.parse().ok()
    }

    /// The live regression model, if one is loaded
    #[must_use]
    pub fn regression(&self) -> Option<&RegressionModel> {
        self.regression.as_ref()
    }

    /// Whether the raw points are joined with lines
    #[must_use]
    pub fn connect_points(&self) -> bool {
        self.connect_points
    }

    /// Creation time
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Path of the last exported image
    #[must_use]
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Renames the graph. The id is unaffected.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the points. A loaded regression keeps its own copy until reassigned.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `points` is empty while a regression is assigned.
    /// Clear the regression first to empty the graph.
    pub fn set_points(&mut self, points: impl Into<Vec<Point>>) -> Result<()> {
        let points = points.into();
        if points.is_empty() && self.model_name != RegressionKind::None.name() {
            return Err(Error::invalid(format!(
                "graph '{}' cannot drop its points while it has a {} regression",
                self.id, self.model_name
            )));
        }

        self.points = points;
        Ok(())
    }

    /// Sets whether the raw points are joined with lines
    pub fn set_connect_points(&mut self, connect: bool) {
        self.connect_points = connect;
    }

    /// Records the path of an exported image
    pub fn set_image_path(&mut self, path: impl Into<String>) {
        self.image_path = path.into();
    }

    /// Assigns a live regression and records its kind as the persisted model name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the graph has no points.
    pub fn set_regression(&mut self, model: RegressionModel) -> Result<()> {
        if self.points.is_empty() {
            return Err(Error::invalid(format!(
                "graph '{}' has no points to fit a {} regression to",
                self.id,
                model.kind()
            )));
        }

        self.model_name = model.name().to_string();
        self.regression = Some(model);
        Ok(())
    }

    /// Builds a regression of `kind` over the graph's points and assigns it.
    ///
    /// [`RegressionKind::None`] clears the regression.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the graph has no points.
    pub fn set_regression_kind(&mut self, kind: RegressionKind) -> Result<()> {
        if kind == RegressionKind::None {
            self.clear_regression();
            return Ok(());
        }

        let model = RegressionModel::new(kind, self.points.clone())?;
        self.set_regression(model)
    }

    /// Removes the regression; the model name becomes `None`
    pub fn clear_regression(&mut self) {
        self.model_name = RegressionKind::None.name().to_string();
        self.regression = None;
    }

    /// Rebuilds the live model from the persisted model name and points.
    ///
    /// Never fails: an unknown name, or a kind that cannot be built over the
    /// current points, is logged and leaves the graph without a regression.
    /// The model name itself is kept so that saving the graph again does not lose it.
    pub fn load_regression(&mut self) {
        self.regression = None;

        let kind = match self.model_name.parse::<RegressionKind>() {
            Ok(RegressionKind::None) => return,
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("Graph '{}': {e}; showing points only", self.id);
                return;
            }
        };

        if self.points.is_empty() {
            log::warn!("Graph '{}': {kind} regression has no points; showing points only", self.id);
            return;
        }

        match RegressionModel::new(kind, self.points.clone()) {
            Ok(model) => self.regression = Some(model),
            Err(e) => log::warn!("Graph '{}': {e}; showing points only", self.id),
        }
    }

    /// Fits the loaded regression over `range`.
    ///
    /// Returns `None` when there is no regression or the fit fails; failures
    /// are logged and the caller should show the raw points alone.
    #[must_use]
    pub fn fit(&self, range: &FitRange) -> Option<FitResult> {
        let mut model = self.regression.clone()?;

        let configured = model
            .set_step(range.step())
            .and_then(|()| model.set_range(range.x_min(), range.x_max()));
        match configured.and_then(|()| model.fit()) {
            Ok(fit) => Some(fit),
            Err(e) => {
                log::info!("Graph '{}': {} fit failed: {e}", self.id, model.kind());
                None
            }
        }
    }

    /// The persisted form of this graph
    #[must_use]
    pub fn to_record(&self) -> GraphRecord {
        GraphRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            points: self.points.clone(),
            model_name: self.model_name.clone(),
            connect_points: self.connect_points,
            time_stamp: self.created_at,
            image_path: self.image_path.clone(),
        }
    }
}
impl From<&Graph> for GraphRecord {
    fn from(graph: &Graph) -> Self {
        graph.to_record()
    }
}

/// Turns a persisted record back into a live graph, rebuilding its regression.
#[must_use]
pub fn rehydrate(record: GraphRecord) -> Graph {
    let mut graph = Graph {
        id: record.id,
        title: record.title,
        points: record.points,
        model_name: record.model_name,
        regression: None,
        connect_points: record.connect_points,
        created_at: record.time_stamp,
        image_path: record.image_path,
    };
    graph.load_regression();
    graph
}
