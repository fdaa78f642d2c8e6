use crate::merge::{concat_into, sum_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SolarPv {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_yearly_energy_produced_kwh: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Wind {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_yearly_energy_produced_kwh: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Generator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_yearly_energy_produced_kwh: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Storage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kwh: Option<f64>,
}

impl ReportNode for SolarPv {
    const DEFINITION: &'static str = "SolarPV";
}

impl ReportNode for Wind {
    const DEFINITION: &'static str = "Wind";
}

impl ReportNode for Generator {
    const DEFINITION: &'static str = "Generator";
}

impl ReportNode for Storage {
    const DEFINITION: &'static str = "Storage";
}

#[derive(Clone, Debug, Display, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Technology {
    SolarPv(SolarPv),
    Wind(Wind),
    Generator(Generator),
    Storage(Storage),
}

/// Distributed energy resources of a feature or scenario and their optimized economics.
///
/// The `total_*` capacities are running sums over the technology lists. They are kept up to date
/// by [`DistributedGeneration::add_tech`] and recomputed whenever a record is read, so any totals
/// present in the input are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(from = "RawDistributedGeneration")]
pub struct DistributedGeneration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcc_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcc_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npv_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_energy_cost_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_demand_cost_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_bill_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_energy_cost_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_demand_cost_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one_bill_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_energy_cost_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_demand_cost_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_energy_cost_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_demand_cost_bau_us_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resilience_hours_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resilience_hours_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resilience_hours_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probs_of_surviving: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub probs_of_surviving_by_month: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub probs_of_surviving_by_hour_of_the_day: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_solar_pv_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_wind_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_generator_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_storage_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_storage_kwh: Option<f64>,
    solar_pv: Vec<SolarPv>,
    wind: Vec<Wind>,
    generator: Vec<Generator>,
    storage: Vec<Storage>,
}

impl DistributedGeneration {
    /// Appends a technology and adds its capacity to the matching running total.
    pub fn add_tech(&mut self, tech: Technology) {
        debug!("adding {tech} technology to distributed generation");
        match tech {
            Technology::SolarPv(pv) => {
                sum_into(&mut self.total_solar_pv_kw, pv.size_kw);
                self.solar_pv.push(pv);
            }
            Technology::Wind(wind) => {
                sum_into(&mut self.total_wind_kw, wind.size_kw);
                self.wind.push(wind);
            }
            Technology::Generator(generator) => {
                sum_into(&mut self.total_generator_kw, generator.size_kw);
                self.generator.push(generator);
            }
            Technology::Storage(storage) => {
                sum_into(&mut self.total_storage_kw, storage.size_kw);
                sum_into(&mut self.total_storage_kwh, storage.size_kwh);
                self.storage.push(storage);
            }
        }
    }

    pub fn merge_distributed_generation(&mut self, other: &DistributedGeneration) {
        sum_into(&mut self.lcc_us_dollars, other.lcc_us_dollars);
        sum_into(&mut self.lcc_bau_us_dollars, other.lcc_bau_us_dollars);
        sum_into(&mut self.npv_us_dollars, other.npv_us_dollars);
        sum_into(
            &mut self.year_one_energy_cost_us_dollars,
            other.year_one_energy_cost_us_dollars,
        );
        sum_into(
            &mut self.year_one_demand_cost_us_dollars,
            other.year_one_demand_cost_us_dollars,
        );
        sum_into(
            &mut self.year_one_bill_us_dollars,
            other.year_one_bill_us_dollars,
        );
        sum_into(
            &mut self.year_one_energy_cost_bau_us_dollars,
            other.year_one_energy_cost_bau_us_dollars,
        );
        sum_into(
            &mut self.year_one_demand_cost_bau_us_dollars,
            other.year_one_demand_cost_bau_us_dollars,
        );
        sum_into(
            &mut self.year_one_bill_bau_us_dollars,
            other.year_one_bill_bau_us_dollars,
        );
        sum_into(
            &mut self.total_energy_cost_us_dollars,
            other.total_energy_cost_us_dollars,
        );
        sum_into(
            &mut self.total_demand_cost_us_dollars,
            other.total_demand_cost_us_dollars,
        );
        sum_into(
            &mut self.total_energy_cost_bau_us_dollars,
            other.total_energy_cost_bau_us_dollars,
        );
        sum_into(
            &mut self.total_demand_cost_bau_us_dollars,
            other.total_demand_cost_bau_us_dollars,
        );
        sum_into(&mut self.resilience_hours_min, other.resilience_hours_min);
        sum_into(&mut self.resilience_hours_max, other.resilience_hours_max);
        sum_into(&mut self.resilience_hours_avg, other.resilience_hours_avg);
        sum_into(&mut self.probs_of_surviving, other.probs_of_surviving);
        concat_into(
            &mut self.probs_of_surviving_by_month,
            &other.probs_of_surviving_by_month,
        );
        concat_into(
            &mut self.probs_of_surviving_by_hour_of_the_day,
            &other.probs_of_surviving_by_hour_of_the_day,
        );

        other
            .technologies()
            .for_each(|tech| self.add_tech(tech));
    }

    /// Every technology in list order: solar, wind, generators and then storage.
    pub fn technologies(&self) -> impl Iterator<Item = Technology> + '_ {
        self.solar_pv
            .iter()
            .cloned()
            .map(Technology::SolarPv)
            .chain(self.wind.iter().cloned().map(Technology::Wind))
            .chain(self.generator.iter().cloned().map(Technology::Generator))
            .chain(self.storage.iter().cloned().map(Technology::Storage))
    }

    pub fn solar_pv(&self) -> &[SolarPv] {
        &self.solar_pv
    }

    pub fn wind(&self) -> &[Wind] {
        &self.wind
    }

    pub fn generator(&self) -> &[Generator] {
        &self.generator
    }

    pub fn storage(&self) -> &[Storage] {
        &self.storage
    }

    pub fn total_solar_pv_kw(&self) -> Option<f64> {
        self.total_solar_pv_kw
    }

    pub fn total_wind_kw(&self) -> Option<f64> {
        self.total_wind_kw
    }

    pub fn total_generator_kw(&self) -> Option<f64> {
        self.total_generator_kw
    }

    pub fn total_storage_kw(&self) -> Option<f64> {
        self.total_storage_kw
    }

    pub fn total_storage_kwh(&self) -> Option<f64> {
        self.total_storage_kwh
    }
}

impl MergeRules for DistributedGeneration {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("lcc_us_dollars", MergeRule::Sum),
        ("lcc_bau_us_dollars", MergeRule::Sum),
        ("npv_us_dollars", MergeRule::Sum),
        ("year_one_energy_cost_us_dollars", MergeRule::Sum),
        ("year_one_demand_cost_us_dollars", MergeRule::Sum),
        ("year_one_bill_us_dollars", MergeRule::Sum),
        ("year_one_energy_cost_bau_us_dollars", MergeRule::Sum),
        ("year_one_demand_cost_bau_us_dollars", MergeRule::Sum),
        ("year_one_bill_bau_us_dollars", MergeRule::Sum),
        ("total_energy_cost_us_dollars", MergeRule::Sum),
        ("total_demand_cost_us_dollars", MergeRule::Sum),
        ("total_energy_cost_bau_us_dollars", MergeRule::Sum),
        ("total_demand_cost_bau_us_dollars", MergeRule::Sum),
        ("resilience_hours_min", MergeRule::Sum),
        ("resilience_hours_max", MergeRule::Sum),
        ("resilience_hours_avg", MergeRule::Sum),
        ("probs_of_surviving", MergeRule::Sum),
        ("probs_of_surviving_by_month", MergeRule::Concat),
        ("probs_of_surviving_by_hour_of_the_day", MergeRule::Concat),
        ("total_solar_pv_kw", MergeRule::Derived),
        ("total_wind_kw", MergeRule::Derived),
        ("total_generator_kw", MergeRule::Derived),
        ("total_storage_kw", MergeRule::Derived),
        ("total_storage_kwh", MergeRule::Derived),
        ("solar_pv", MergeRule::Concat),
        ("wind", MergeRule::Concat),
        ("generator", MergeRule::Concat),
        ("storage", MergeRule::Concat),
    ];
}

impl Merge for DistributedGeneration {
    fn merge(&mut self, other: &Self) {
        self.merge_distributed_generation(other);
    }
}

impl ReportNode for DistributedGeneration {
    const DEFINITION: &'static str = "DistributedGeneration";
}

/// Technologies may be given as a single object or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(vec![])
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawDistributedGeneration {
    lcc_us_dollars: Option<f64>,
    lcc_bau_us_dollars: Option<f64>,
    npv_us_dollars: Option<f64>,
    year_one_energy_cost_us_dollars: Option<f64>,
    year_one_demand_cost_us_dollars: Option<f64>,
    year_one_bill_us_dollars: Option<f64>,
    year_one_energy_cost_bau_us_dollars: Option<f64>,
    year_one_demand_cost_bau_us_dollars: Option<f64>,
    year_one_bill_bau_us_dollars: Option<f64>,
    total_energy_cost_us_dollars: Option<f64>,
    total_demand_cost_us_dollars: Option<f64>,
    total_energy_cost_bau_us_dollars: Option<f64>,
    total_demand_cost_bau_us_dollars: Option<f64>,
    resilience_hours_min: Option<f64>,
    resilience_hours_max: Option<f64>,
    resilience_hours_avg: Option<f64>,
    probs_of_surviving: Option<f64>,
    probs_of_surviving_by_month: Vec<f64>,
    probs_of_surviving_by_hour_of_the_day: Vec<f64>,
    solar_pv: OneOrMany<SolarPv>,
    wind: OneOrMany<Wind>,
    generator: OneOrMany<Generator>,
    storage: OneOrMany<Storage>,
}

fn has_capacity(size_kw: Option<f64>) -> bool {
    size_kw.is_some_and(|size| size != 0.)
}

impl From<RawDistributedGeneration> for DistributedGeneration {
    fn from(raw: RawDistributedGeneration) -> Self {
        let mut distributed_generation = DistributedGeneration {
            lcc_us_dollars: raw.lcc_us_dollars,
            lcc_bau_us_dollars: raw.lcc_bau_us_dollars,
            npv_us_dollars: raw.npv_us_dollars,
            year_one_energy_cost_us_dollars: raw.year_one_energy_cost_us_dollars,
            year_one_demand_cost_us_dollars: raw.year_one_demand_cost_us_dollars,
            year_one_bill_us_dollars: raw.year_one_bill_us_dollars,
            year_one_energy_cost_bau_us_dollars: raw.year_one_energy_cost_bau_us_dollars,
            year_one_demand_cost_bau_us_dollars: raw.year_one_demand_cost_bau_us_dollars,
            year_one_bill_bau_us_dollars: raw.year_one_bill_bau_us_dollars,
            total_energy_cost_us_dollars: raw.total_energy_cost_us_dollars,
            total_demand_cost_us_dollars: raw.total_demand_cost_us_dollars,
            total_energy_cost_bau_us_dollars: raw.total_energy_cost_bau_us_dollars,
            total_demand_cost_bau_us_dollars: raw.total_demand_cost_bau_us_dollars,
            resilience_hours_min: raw.resilience_hours_min,
            resilience_hours_max: raw.resilience_hours_max,
            resilience_hours_avg: raw.resilience_hours_avg,
            probs_of_surviving: raw.probs_of_surviving,
            probs_of_surviving_by_month: raw.probs_of_surviving_by_month,
            probs_of_surviving_by_hour_of_the_day: raw.probs_of_surviving_by_hour_of_the_day,
            ..Default::default()
        };

        let solar_pv: Vec<SolarPv> = raw.solar_pv.into();
        let wind: Vec<Wind> = raw.wind.into();
        let generator: Vec<Generator> = raw.generator.into();
        let storage: Vec<Storage> = raw.storage.into();

        // technologies without a capacity are not carried into the report
        solar_pv
            .into_iter()
            .filter(|pv| has_capacity(pv.size_kw))
            .map(Technology::SolarPv)
            .chain(
                wind.into_iter()
                    .filter(|wind| has_capacity(wind.size_kw))
                    .map(Technology::Wind),
            )
            .chain(
                generator
                    .into_iter()
                    .filter(|generator| has_capacity(generator.size_kw))
                    .map(Technology::Generator),
            )
            .chain(
                storage
                    .into_iter()
                    .filter(|storage| has_capacity(storage.size_kw))
                    .map(Technology::Storage),
            )
            .for_each(|tech| distributed_generation.add_tech(tech));

        distributed_generation
    }
}
