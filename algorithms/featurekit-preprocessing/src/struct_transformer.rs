//! Record level pipeline
//!
//! A [`StructTransformer`] holds one [`FieldTransformer`] per declared field of a record type
//! `R` and concatenates their outputs, in declaration order, into a single feature vector.
//! Fields are read from the record through plain function pointers, so a fitted pipeline is
//! `Send + Sync` whatever `R` is.

use crate::error::{PreprocessingError, Result};
use crate::field_transformer::{FieldTransformer, FieldValue, TransformerKind, ValueKind};
use featurekit::traits::{FeatureNames, Fit, TransformInplace, Transformer};
use featurekit::ParamGuard;
use ndarray::{s, Array1, Array2, ArrayViewMut1};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Reads the value of a field from a record
pub enum Accessor<R> {
    Numeric(fn(&R) -> f64),
    Text(fn(&R) -> &str),
}

impl<R> Accessor<R> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Accessor::Numeric(_) => ValueKind::Numeric,
            Accessor::Text(_) => ValueKind::Text,
        }
    }

    pub fn read<'r>(&self, record: &'r R) -> FieldValue<'r> {
        match self {
            Accessor::Numeric(get) => FieldValue::Numeric(get(record)),
            Accessor::Text(get) => FieldValue::Text(get(record)),
        }
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<R> {}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Numeric(_) => write!(f, "Accessor::Numeric"),
            Accessor::Text(_) => write!(f, "Accessor::Text"),
        }
    }
}

/// A named field of `R` together with the transformer applied to it
pub struct StructField<R> {
    name: String,
    accessor: Accessor<R>,
    transformer: FieldTransformer,
}

impl<R> StructField<R> {
    pub fn new<T: Into<FieldTransformer>>(name: &str, accessor: Accessor<R>, transformer: T) -> Self {
        Self {
            name: name.to_string(),
            accessor,
            transformer: transformer.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accessor(&self) -> Accessor<R> {
        self.accessor
    }

    pub fn transformer(&self) -> &FieldTransformer {
        &self.transformer
    }
}

impl<R> Clone for StructField<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            accessor: self.accessor,
            transformer: self.transformer.clone(),
        }
    }
}

impl<R> fmt::Debug for StructField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructField")
            .field("name", &self.name)
            .field("accessor", &self.accessor)
            .field("transformer", &self.transformer)
            .finish()
    }
}

/// Fitted state of a single field
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    pub name: String,
    pub transformer: FieldTransformer,
}

/// Fitted state of a whole pipeline, fields in declaration order. This is what gets persisted:
/// accessors are code and are declared again when the pipeline is rebuilt.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructTransformerState {
    pub fields: Vec<FieldState>,
}

/// Record level transformer: fits every field on its own column and concatenates the outputs
/// of all fields into one vector.
///
/// Scalar fields produce one value, expanding fields (one-hot, count and tf-idf) as many
/// values as they have fitted categories. The output width is the sum of these and is
/// recomputed on every call, use [`FeatureNames::num_features`] to size buffers.
///
/// ### Example
///
/// ```rust
/// use featurekit::traits::{FeatureNames, Fit, Transformer};
/// use featurekit::ParamGuard;
/// use featurekit_preprocessing::struct_transformer::StructTransformer;
///
/// struct Person {
///     age: u32,
///     city: String,
/// }
///
/// fn city(p: &Person) -> &str {
///     &p.city
/// }
///
/// let mut transformer = StructTransformer::params()
///     .numeric("age", "minmax", |p: &Person| p.age as f64)
///     .text("city", "onehot", city)
///     .check()
///     .unwrap()
///     .build()
///     .unwrap();
///
/// transformer.fit(&[
///     Person { age: 20, city: "Seoul".to_string() },
///     Person { age: 40, city: "Busan".to_string() },
/// ]);
/// assert_eq!(transformer.feature_names(), vec!["age", "city_Seoul", "city_Busan"]);
///
/// let features = transformer.transform(&Person { age: 30, city: "Busan".to_string() });
/// assert_eq!(features.unwrap().to_vec(), vec![0.5, 0., 1.]);
/// ```
pub struct StructTransformer<R> {
    fields: Vec<StructField<R>>,
}

impl<R> StructTransformer<R> {
    /// Builds a pipeline from a list of fields, taken as is
    pub fn new(fields: Vec<StructField<R>>) -> Self {
        Self { fields }
    }

    /// Declares the fields of a pipeline by tag, validated before anything is built
    pub fn params() -> StructTransformerParams<R> {
        StructTransformerParams::new()
    }

    pub fn fields(&self) -> &[StructField<R>] {
        &self.fields
    }

    /// Copies the fitted state of every field
    pub fn state(&self) -> StructTransformerState {
        StructTransformerState {
            fields: self
                .fields
                .iter()
                .map(|f| FieldState {
                    name: f.name.clone(),
                    transformer: f.transformer.clone(),
                })
                .collect(),
        }
    }

    /// Replaces the fitted state of every field. Fails without changing anything when the
    /// state was not produced by a pipeline with the same fields (count, names and kinds).
    pub fn load_state(&mut self, state: StructTransformerState) -> Result<()> {
        if state.fields.len() != self.fields.len() {
            return Err(PreprocessingError::StateMismatch(format!(
                "expected {} fields, found {}",
                self.fields.len(),
                state.fields.len()
            )));
        }
        for (field, saved) in self.fields.iter().zip(&state.fields) {
            if field.name != saved.name {
                return Err(PreprocessingError::StateMismatch(format!(
                    "expected field {}, found {}",
                    field.name, saved.name
                )));
            }
            if field.transformer.kind() != saved.transformer.kind() {
                return Err(PreprocessingError::StateMismatch(format!(
                    "field {} is declared as {} but the state holds {}",
                    field.name,
                    field.transformer.kind(),
                    saved.transformer.kind()
                )));
            }
        }
        for (field, saved) in self.fields.iter_mut().zip(state.fields) {
            field.transformer = saved.transformer;
        }
        Ok(())
    }

    /// Transforms every record into one row of the returned array
    pub fn transform_batch(&self, records: &[R]) -> Array2<f64> {
        let mut out = Array2::zeros((records.len(), self.num_features()));
        for (row, record) in out.rows_mut().into_iter().zip(records) {
            self.transform_inplace(row, record);
        }
        out
    }
}

impl<R> Clone for StructTransformer<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<R> fmt::Debug for StructTransformer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructTransformer")
            .field("fields", &self.fields)
            .finish()
    }
}

impl<R> Fit<R> for StructTransformer<R> {
    /// Fits every field on the column of its values. An empty batch leaves every field unfit.
    fn fit(&mut self, records: &[R]) {
        for field in self.fields.iter_mut() {
            log::debug!(
                "fitting field {} ({}) on {} records",
                field.name,
                field.transformer.kind(),
                records.len()
            );
            match field.accessor {
                Accessor::Numeric(get) => {
                    let column: Vec<f64> = records.iter().map(get).collect();
                    field.transformer.fit_numeric(&column);
                }
                Accessor::Text(get) => {
                    let column: Vec<&str> = records.iter().map(|r| get(r)).collect();
                    field.transformer.fit_text(&column);
                }
            }
        }
    }
}

impl<R> FeatureNames for StructTransformer<R> {
    fn num_features(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.transformer.num_features())
            .sum()
    }

    /// Scalar fields are named after the field, expanding fields `field_category` for every
    /// fitted category
    fn feature_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|f| f.transformer.feature_names(&f.name))
            .collect()
    }
}

impl<'a, R> Transformer<&'a R, Option<Array1<f64>>> for StructTransformer<R> {
    /// Returns `None` when the pipeline has no fields.
    fn transform(&self, x: &'a R) -> Option<Array1<f64>> {
        if self.fields.is_empty() {
            return None;
        }
        let mut features = Array1::zeros(self.num_features());
        self.transform_inplace(features.view_mut(), x);
        Some(features)
    }
}

impl<'a, R> Transformer<Option<&'a R>, Option<Array1<f64>>> for StructTransformer<R> {
    /// Returns `None` for a missing record.
    fn transform(&self, x: Option<&'a R>) -> Option<Array1<f64>> {
        x.and_then(|record| self.transform(record))
    }
}

impl<'a, R> TransformInplace<&'a R> for StructTransformer<R> {
    fn transform_inplace(&self, mut dest: ArrayViewMut1<'_, f64>, x: &'a R) {
        if dest.len() != self.num_features() {
            return;
        }
        let mut offset = 0;
        for field in &self.fields {
            let width = field.transformer.num_features();
            field.transformer.transform_inplace(
                dest.slice_mut(s![offset..offset + width]),
                field.accessor.read(x),
            );
            offset += width;
        }
    }
}

struct FieldSpec<R> {
    name: String,
    tag: String,
    accessor: Accessor<R>,
}

/// A verified set of field declarations, ready to build a [`StructTransformer`]
///
/// See [`StructTransformerParams`] for more information.
pub struct StructTransformerValidParams<R> {
    fields: Vec<FieldSpec<R>>,
}

impl<R> StructTransformerValidParams<R> {
    /// Declared field names, in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Builds an unfitted pipeline
    pub fn build(&self) -> Result<StructTransformer<R>> {
        let fields = self
            .fields
            .iter()
            .map(|spec| -> Result<StructField<R>> {
                let kind = TransformerKind::from_tag(&spec.tag)?;
                Ok(StructField {
                    name: spec.name.clone(),
                    accessor: spec.accessor,
                    transformer: kind.build(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(StructTransformer::new(fields))
    }
}

/// Field declarations of a record pipeline: a name, a tag out of the tag vocabulary and an
/// accessor per field.
///
/// Checking fails on an empty or repeated field name, on an unknown tag and on a tag whose
/// transformer does not accept the kind of value read by the accessor.
pub struct StructTransformerParams<R>(StructTransformerValidParams<R>);

impl<R> StructTransformerParams<R> {
    pub fn new() -> Self {
        Self(StructTransformerValidParams { fields: Vec::new() })
    }

    /// Declares a field holding numbers
    pub fn numeric(mut self, name: &str, tag: &str, accessor: fn(&R) -> f64) -> Self {
        self.0.fields.push(FieldSpec {
            name: name.to_string(),
            tag: tag.to_string(),
            accessor: Accessor::Numeric(accessor),
        });
        self
    }

    /// Declares a field holding text
    pub fn text(mut self, name: &str, tag: &str, accessor: fn(&R) -> &str) -> Self {
        self.0.fields.push(FieldSpec {
            name: name.to_string(),
            tag: tag.to_string(),
            accessor: Accessor::Text(accessor),
        });
        self
    }
}

impl<R> Default for StructTransformerParams<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ParamGuard for StructTransformerParams<R> {
    type Checked = StructTransformerValidParams<R>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let mut seen = HashSet::new();
        for field in &self.0.fields {
            if field.name.is_empty() {
                return Err(featurekit::error::Error::Parameters(format!(
                    "field name must not be empty (tag \"{}\")",
                    field.tag
                ))
                .into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(PreprocessingError::DuplicateField(field.name.clone()));
            }
            let kind = TransformerKind::from_tag(&field.tag)?;
            if kind.input() != field.accessor.kind() {
                return Err(PreprocessingError::UnsupportedValueType {
                    field: field.name.clone(),
                    tag: field.tag.clone(),
                    expected: kind.input(),
                    found: field.accessor.kind(),
                });
            }
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::categorical_encoding::{OneHotEncoder, OrdinalEncoder};
    use crate::count_vectorization::CountVectorizer;
    use crate::linear_scaling::{Identity, MaxAbsScaler, MinMaxScaler, StandardScaler};
    use crate::quantile_scaling::{KBinsDiscretizer, QuantileScaler};
    use crate::tf_idf_vectorization::TfIdfVectorizer;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::collections::HashMap;

    #[derive(Clone, Debug, Default)]
    struct Employee {
        age: i32,
        salary: f64,
        kids: i32,
        weight: f64,
        height: f64,
        city: String,
        car: String,
        income: f64,
        description: String,
    }

    fn city(e: &Employee) -> &str {
        &e.city
    }

    fn car(e: &Employee) -> &str {
        &e.car
    }

    fn description(e: &Employee) -> &str {
        &e.description
    }

    fn employee_params() -> StructTransformerParams<Employee> {
        StructTransformer::params()
            .numeric("Age", "identity", |e: &Employee| e.age as f64)
            .numeric("Salary", "minmax", |e: &Employee| e.salary)
            .numeric("Kids", "maxabs", |e: &Employee| e.kids as f64)
            .numeric("Weight", "standard", |e: &Employee| e.weight)
            .numeric("Height", "quantile", |e: &Employee| e.height)
            .text("City", "onehot", city)
            .text("Car", "ordinal", car)
            .numeric("Income", "kbins", |e: &Employee| e.income)
            .text("Description", "tfidf", description)
    }

    fn mapping(entries: &[(&str, usize)]) -> HashMap<String, usize> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn fitted_employee_transformer() -> StructTransformer<Employee> {
        StructTransformer::new(vec![
            StructField::new("Age", Accessor::Numeric(|e: &Employee| e.age as f64), Identity),
            StructField::new(
                "Salary",
                Accessor::Numeric(|e: &Employee| e.salary),
                MinMaxScaler::new(500., 900.),
            ),
            StructField::new(
                "Kids",
                Accessor::Numeric(|e: &Employee| e.kids as f64),
                MaxAbsScaler::new(4.),
            ),
            StructField::new(
                "Weight",
                Accessor::Numeric(|e: &Employee| e.weight),
                StandardScaler::new(60., 25.),
            ),
            StructField::new(
                "Height",
                Accessor::Numeric(|e: &Employee| e.height),
                QuantileScaler::from_quantiles(vec![20., 100., 110., 120., 150.]),
            ),
            StructField::new(
                "City",
                Accessor::Text(city),
                OneHotEncoder::new(&["Pangyo", "Seoul", "Daejeon", "Busan"]),
            ),
            StructField::new(
                "Car",
                Accessor::Text(car),
                OrdinalEncoder::new(mapping(&[("Tesla", 1), ("BMW", 90000)])),
            ),
            StructField::new(
                "Income",
                Accessor::Numeric(|e: &Employee| e.income),
                KBinsDiscretizer::from_quantiles(vec![1000., 1100., 2000., 3000., 10000.]),
            ),
            StructField::new(
                "Description",
                Accessor::Text(description),
                TfIdfVectorizer::new(
                    CountVectorizer::new(mapping(&[("text", 0), ("problem", 1), ("help", 2)]), " "),
                    vec![1, 2, 2],
                    2,
                ),
            ),
        ])
    }

    fn sample_employee() -> Employee {
        Employee {
            age: 22,
            salary: 1000.,
            kids: 2,
            weight: 85.1,
            height: 160.,
            city: "Pangyo".to_string(),
            car: "Tesla".to_string(),
            income: 9000.1,
            description: "large text fields are not a problem neither, tf-idf can help here too! more advanced NLP will be added later!".to_string(),
        }
    }

    fn training_employees() -> Vec<Employee> {
        vec![
            Employee {
                salary: 500.,
                kids: 2,
                weight: 50.,
                height: 160.,
                city: "Pangyo".to_string(),
                car: "Tesla".to_string(),
                income: 9000.1,
                description: "text problem help".to_string(),
                ..Employee::default()
            },
            Employee {
                salary: 900.,
                kids: 0,
                weight: 10.,
                height: 120.,
                city: "Seoul".to_string(),
                car: "BMW".to_string(),
                income: 420.1,
                description: "problem help".to_string(),
                ..Employee::default()
            },
        ]
    }

    #[test]
    fn test_transform_employee() {
        let transformer = fitted_employee_transformer();
        let features = transformer.transform(&sample_employee()).unwrap();
        let expected = array![
            22.,
            1.,
            0.5,
            1.0039999999999998,
            1.,
            1.,
            0.,
            0.,
            0.,
            1.,
            5.,
            0.7674945674619879,
            0.4532946552278861,
            0.4532946552278861
        ];
        assert_abs_diff_eq!(features, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_feature_names_employee() {
        let transformer = fitted_employee_transformer();
        assert_eq!(
            transformer.feature_names(),
            vec![
                "Age",
                "Salary",
                "Kids",
                "Weight",
                "Height",
                "City_Pangyo",
                "City_Seoul",
                "City_Daejeon",
                "City_Busan",
                "Car",
                "Income",
                "Description_text",
                "Description_problem",
                "Description_help"
            ]
        );
        assert_eq!(transformer.num_features(), 14);
    }

    #[test]
    fn test_feature_names_unfit() {
        let transformer = employee_params().check().unwrap().build().unwrap();
        assert_eq!(
            transformer.feature_names(),
            vec!["Age", "Salary", "Kids", "Weight", "Height", "Car", "Income"]
        );
        assert_eq!(transformer.num_features(), 7);
    }

    #[test]
    fn test_fit_employees() {
        let mut transformer = employee_params().check().unwrap().build().unwrap();
        transformer.fit(&training_employees());

        let transformers: Vec<&FieldTransformer> =
            transformer.fields().iter().map(|f| f.transformer()).collect();
        assert_eq!(transformers[0], &FieldTransformer::Identity(Identity));
        assert_eq!(
            transformers[1],
            &FieldTransformer::MinMax(MinMaxScaler::new(500., 900.))
        );
        assert_eq!(transformers[2], &FieldTransformer::MaxAbs(MaxAbsScaler::new(2.)));
        match transformers[3] {
            FieldTransformer::Standard(t) => {
                assert_abs_diff_eq!(t.mean(), 30.);
                assert_abs_diff_eq!(t.std(), 28.284271247461902, epsilon = 1e-12);
            }
            other => panic!("unexpected transformer {:?}", other),
        }
        match transformers[4] {
            FieldTransformer::Quantile(t) => assert_eq!(t.quantiles(), &[120., 160.]),
            other => panic!("unexpected transformer {:?}", other),
        }
        assert_eq!(
            transformers[5],
            &FieldTransformer::OneHot(OneHotEncoder::new(&["Pangyo", "Seoul"]))
        );
        assert_eq!(
            transformers[6],
            &FieldTransformer::Ordinal(OrdinalEncoder::new(mapping(&[("Tesla", 1), ("BMW", 2)])))
        );
        match transformers[7] {
            FieldTransformer::KBins(t) => assert_eq!(t.scaler().quantiles(), &[420.1, 9000.1]),
            other => panic!("unexpected transformer {:?}", other),
        }
        match transformers[8] {
            FieldTransformer::TfIdf(t) => {
                assert_eq!(t.num_documents(), 2);
                assert_eq!(t.doc_count(), &[1, 2, 2]);
                assert_eq!(
                    t.count_vectorizer().vocabulary(),
                    &mapping(&[("text", 0), ("problem", 1), ("help", 2)])
                );
            }
            other => panic!("unexpected transformer {:?}", other),
        }
        assert_eq!(transformer.num_features(), 12);
    }

    #[test]
    fn test_fit_empty_batch_leaves_fields_unfit() {
        let mut transformer = employee_params().check().unwrap().build().unwrap();
        transformer.fit(&[]);
        assert_eq!(
            transformer.feature_names(),
            vec!["Age", "Salary", "Kids", "Weight", "Height", "Car", "Income"]
        );
        let features = transformer.transform(&sample_employee()).unwrap();
        assert_eq!(features.len(), 7);
        assert_eq!(features[0], 22.);
        assert_eq!(features[1], 0.);
        // an unfit standard scaler has a zero deviation
        assert!(!features[3].is_finite());
    }

    #[derive(Default)]
    struct Person {
        age: f64,
        salary: f64,
        gender: String,
        city: String,
    }

    fn person_transformer() -> StructTransformer<Person> {
        StructTransformer::new(vec![
            StructField::new(
                "Age",
                Accessor::Numeric(|p: &Person| p.age),
                MinMaxScaler::new(1., 10.),
            ),
            StructField::new(
                "Salary",
                Accessor::Numeric(|p: &Person| p.salary),
                StandardScaler::new(15., 2.5),
            ),
            StructField::new(
                "Gender",
                Accessor::Text(|p: &Person| p.gender.as_str()),
                OneHotEncoder::new(&["male", "female"]),
            ),
            StructField::new(
                "City",
                Accessor::Text(|p: &Person| p.city.as_str()),
                OrdinalEncoder::new(mapping(&[("city-A", 1), ("city-B", 2)])),
            ),
        ])
    }

    fn sample_person() -> Person {
        Person {
            age: 23.,
            salary: 17.5,
            gender: "female".to_string(),
            city: "city-B".to_string(),
        }
    }

    #[test]
    fn test_transform_basic() {
        let transformer = person_transformer();
        assert_eq!(
            transformer.transform(&sample_person()),
            Some(array![1., 1., 0., 1., 2.])
        );
    }

    #[test]
    fn test_transform_missing_record() {
        let transformer = person_transformer();
        assert_eq!(transformer.transform(None), None);
        assert_eq!(
            transformer.transform(Some(&sample_person())),
            Some(array![1., 1., 0., 1., 2.])
        );

        let empty: StructTransformer<Person> = StructTransformer::new(Vec::new());
        assert_eq!(empty.transform(None), None);
        assert_eq!(empty.transform(&sample_person()), None);
        assert_eq!(empty.num_features(), 0);
    }

    #[test]
    fn test_transform_inplace() {
        let transformer = person_transformer();
        let mut dest = array![9., 9., 9., 9., 9.];
        transformer.transform_inplace(dest.view_mut(), &sample_person());
        assert_eq!(dest, array![1., 1., 0., 1., 2.]);

        let mut dest = array![9., 9., 9.];
        transformer.transform_inplace(dest.view_mut(), &sample_person());
        assert_eq!(dest, array![9., 9., 9.]);
    }

    #[test]
    fn test_transform_batch() {
        let transformer = person_transformer();
        let people = vec![
            sample_person(),
            Person {
                age: 1.,
                salary: 15.,
                gender: "male".to_string(),
                city: "city-C".to_string(),
            },
        ];
        let batch = transformer.transform_batch(&people);
        assert_eq!(
            batch,
            array![[1., 1., 0., 1., 2.], [0., 0., 1., 0., 0.]]
        );
    }

    #[test]
    fn test_params_unknown_tag() {
        let params = StructTransformer::params()
            .numeric("Age", "minmax", |p: &Person| p.age)
            .numeric("Salary", "logscale", |p: &Person| p.salary);
        assert!(matches!(
            params.check_ref(),
            Err(PreprocessingError::UnknownTag(tag)) if tag == "logscale"
        ));
    }

    #[test]
    fn test_params_unsupported_value_type() {
        let params = StructTransformer::params()
            .text("Gender", "minmax", |p: &Person| p.gender.as_str());
        assert_eq!(
            params.check().err(),
            Some(PreprocessingError::UnsupportedValueType {
                field: "Gender".to_string(),
                tag: "minmax".to_string(),
                expected: ValueKind::Numeric,
                found: ValueKind::Text,
            })
        );

        let params = StructTransformer::params().numeric("Age", "onehot", |p: &Person| p.age);
        assert!(matches!(
            params.check(),
            Err(PreprocessingError::UnsupportedValueType { .. })
        ));
    }

    #[test]
    fn test_params_field_names() {
        let params = StructTransformer::params()
            .numeric("Age", "minmax", |p: &Person| p.age)
            .numeric("Age", "standard", |p: &Person| p.salary);
        assert_eq!(
            params.check().err(),
            Some(PreprocessingError::DuplicateField("Age".to_string()))
        );

        let params = StructTransformer::params().numeric("", "minmax", |p: &Person| p.age);
        assert!(matches!(
            params.check(),
            Err(PreprocessingError::FeaturekitError(
                featurekit::error::Error::Parameters(_)
            ))
        ));
    }

    #[test]
    fn test_params_build() {
        let valid = employee_params().check().unwrap();
        assert_eq!(
            valid.field_names(),
            vec!["Age", "Salary", "Kids", "Weight", "Height", "City", "Car", "Income", "Description"]
        );
        let transformer = valid.build().unwrap();
        let kinds: Vec<&str> = transformer
            .fields()
            .iter()
            .map(|f| f.transformer().kind().tag())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "identity",
                "minmax",
                "maxabs",
                "standard",
                "quantile",
                "onehot",
                "ordinal",
                "kbins",
                "tfidf"
            ]
        );
    }

    #[test]
    fn test_load_state() {
        let mut transformer = employee_params().check().unwrap().build().unwrap();
        transformer
            .load_state(fitted_employee_transformer().state())
            .unwrap();
        assert_eq!(
            transformer.transform(&sample_employee()),
            fitted_employee_transformer().transform(&sample_employee())
        );
    }

    #[test]
    fn test_load_state_mismatch() {
        let mut transformer = employee_params().check().unwrap().build().unwrap();
        let before = transformer.state();

        let mut state = fitted_employee_transformer().state();
        state.fields.pop();
        assert!(matches!(
            transformer.load_state(state),
            Err(PreprocessingError::StateMismatch(_))
        ));

        let mut state = fitted_employee_transformer().state();
        state.fields[1].name = "Wage".to_string();
        assert!(matches!(
            transformer.load_state(state),
            Err(PreprocessingError::StateMismatch(_))
        ));

        let mut state = fitted_employee_transformer().state();
        state.fields[1].transformer = FieldTransformer::Standard(StandardScaler::new(1., 1.));
        assert!(matches!(
            transformer.load_state(state),
            Err(PreprocessingError::StateMismatch(_))
        ));

        assert_eq!(transformer.state(), before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_state_round_trip() {
        let mut fitted = employee_params().check().unwrap().build().unwrap();
        fitted.fit(&training_employees());

        let json = serde_json::to_string(&fitted.state()).unwrap();
        let state: StructTransformerState = serde_json::from_str(&json).unwrap();

        let mut reloaded = employee_params().check().unwrap().build().unwrap();
        reloaded.load_state(state.clone()).unwrap();
        assert_eq!(reloaded.state(), state);

        for employee in training_employees().iter().chain(Some(&sample_employee())) {
            assert_eq!(reloaded.transform(employee), fitted.transform(employee));
        }
        assert_eq!(reloaded.feature_names(), fitted.feature_names());
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StructTransformer<Employee>>();
        assert_send_sync::<StructTransformer<std::rc::Rc<Employee>>>();
    }
}
