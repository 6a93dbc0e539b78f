//! Named functions and their signatures

use crate::{IdType, ValueType};

symbol_enum! {
    /// Functions callable by name
    pub enum NamedFunction {
        FirstNonNull = "firstNonNull",
        Greatest = "greatest",
        If = "if",
        IsNotNull = "isNotNull",
        IsNull = "isNull",
        Least = "least",
        Log = "log",
        Log10 = "log10",
        RemoveZeros = "removeZeros",
        /// Groups the data items of its argument into one unit of resolution
        SubExpression = "subExpression",
        OrgUnitAncestor = "orgUnit.ancestor",
        OrgUnitDataSet = "orgUnit.dataSet",
        OrgUnitGroup = "orgUnit.group",
        OrgUnitProgram = "orgUnit.program",
        // aggregating functions
        Avg = "avg",
        Count = "count",
        Max = "max",
        Median = "median",
        Min = "min",
        PercentileCont = "percentileCont",
        Stddev = "stddev",
        StddevPop = "stddevPop",
        StddevSamp = "stddevSamp",
        Sum = "sum",
        Variance = "variance",
        // rule engine functions
        D2AddDays = "d2:addDays",
        D2Ceil = "d2:ceil",
        D2Concatenate = "d2:concatenate",
        D2Count = "d2:count",
        D2DaysBetween = "d2:daysBetween",
        D2Floor = "d2:floor",
        D2HasValue = "d2:hasValue",
        D2Left = "d2:left",
        D2Length = "d2:length",
        D2Modulus = "d2:modulus",
        D2MonthsBetween = "d2:monthsBetween",
        D2Oizp = "d2:oizp",
        D2Right = "d2:right",
        D2Round = "d2:round",
        D2Substring = "d2:substring",
        D2ValidatePattern = "d2:validatePattern",
        D2WeeksBetween = "d2:weeksBetween",
        D2YearsBetween = "d2:yearsBetween",
        D2Zing = "d2:zing",
        D2Zpvc = "d2:zpvc",
        /// Weight-for-age z-score from age in months, weight in kg and gender
        D2ZScoreWfa = "d2:zScoreWFA",
        /// Height-for-age z-score from age in months, height in cm and gender
        D2ZScoreHfa = "d2:zScoreHFA",
        /// Weight-for-height z-score from height in cm, weight in kg and gender
        D2ZScoreWfh = "d2:zScoreWFH",
    }
}

impl NamedFunction {
    /// Whether the function aggregates its data items over periods
    pub const fn is_aggregating(&self) -> bool {
        matches!(
            self,
            Self::Avg
                | Self::Count
                | Self::Max
                | Self::Median
                | Self::Min
                | Self::PercentileCont
                | Self::Stddev
                | Self::StddevPop
                | Self::StddevSamp
                | Self::Sum
                | Self::Variance
        )
    }

    /// The declared result type; `Same` takes the type of the argument in
    /// the first `Same` parameter position
    pub const fn value_type(&self) -> ValueType {
        use ValueType::{Boolean, Date, Number, Same, String};
        match self {
            Self::FirstNonNull | Self::If | Self::SubExpression => Same,
            Self::IsNotNull
            | Self::IsNull
            | Self::OrgUnitAncestor
            | Self::OrgUnitDataSet
            | Self::OrgUnitGroup
            | Self::OrgUnitProgram
            | Self::D2HasValue
            | Self::D2ValidatePattern => Boolean,
            Self::D2AddDays => Date,
            Self::D2Concatenate | Self::D2Left | Self::D2Right | Self::D2Substring => String,
            _ => Number,
        }
    }

    /// The declared parameter types. The last entry repeats for variadic
    /// functions.
    pub const fn parameter_types(&self) -> &'static [ValueType] {
        use ValueType::{Boolean, Date, Mixed, Number, Same, String};
        match self {
            Self::FirstNonNull | Self::SubExpression => &[Same],
            Self::If => &[Boolean, Same, Same],
            Self::IsNotNull | Self::IsNull | Self::Count | Self::D2Count | Self::D2HasValue => {
                &[Mixed]
            }
            Self::Log | Self::PercentileCont | Self::D2Modulus | Self::D2Round => &[Number, Number],
            Self::OrgUnitAncestor
            | Self::OrgUnitDataSet
            | Self::OrgUnitGroup
            | Self::OrgUnitProgram
            | Self::D2Concatenate
            | Self::D2Length => &[String],
            Self::D2AddDays => &[Date, Number],
            Self::D2DaysBetween
            | Self::D2MonthsBetween
            | Self::D2WeeksBetween
            | Self::D2YearsBetween => &[Date, Date],
            Self::D2Left | Self::D2Right => &[String, Number],
            Self::D2Substring => &[String, Number, Number],
            Self::D2ValidatePattern => &[String, String],
            Self::D2ZScoreWfa | Self::D2ZScoreHfa | Self::D2ZScoreWfh => &[Number, Number, String],
            _ => &[Number],
        }
    }

    /// The identifier type of UIDs passed as arguments, for functions that
    /// take identifiers instead of values
    pub const fn uid_type(&self) -> Option<IdType> {
        match self {
            Self::OrgUnitAncestor => Some(IdType::OrganisationUnitUid),
            Self::OrgUnitDataSet => Some(IdType::DataSetUid),
            Self::OrgUnitGroup => Some(IdType::OrganisationUnitGroupUid),
            Self::OrgUnitProgram => Some(IdType::ProgramUid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_functions_declare_same_parameter() {
        for function in NamedFunction::ALL {
            if function.value_type().is_same() {
                assert!(
                    function.parameter_types().iter().any(ValueType::is_same),
                    "{function} returns SAME without a SAME parameter"
                );
            }
        }
    }

    #[test]
    fn test_aggregating() {
        assert!(NamedFunction::Avg.is_aggregating());
        assert!(NamedFunction::Variance.is_aggregating());
        assert!(!NamedFunction::SubExpression.is_aggregating());
        assert!(!NamedFunction::D2Count.is_aggregating());
    }
}
