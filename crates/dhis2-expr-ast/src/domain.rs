//! Closed option domains referenced by identifier nodes

symbol_enum! {
    /// The kind of object an identifier refers to
    pub enum IdType {
        DataElementUid = "DataElementUID",
        CategoryOptionComboUid = "CategoryOptionComboUID",
        AttributeOptionComboUid = "AttributeOptionComboUID",
        DataElementGroupUid = "DataElementGroupUID",
        CategoryOptionGroupUid = "CategoryOptionGroupUID",
        ProgramUid = "ProgramUID",
        ProgramStageUid = "ProgramStageUID",
        ProgramIndicatorUid = "ProgramIndicatorUID",
        AttributeUid = "AttributeUID",
        ConstantUid = "ConstantUID",
        IndicatorUid = "IndicatorUID",
        OrganisationUnitUid = "OrganisationUnitUID",
        OrganisationUnitGroupUid = "OrganisationUnitGroupUID",
        DataSetUid = "DataSetUID",
        ReportingRateType = "ReportingRateType",
    }
}

symbol_enum! {
    /// The item types of `X{...}` data item references
    pub enum DataItemType {
        DataElement = "#",
        Attribute = "A",
        Constant = "C",
        Indicator = "N",
        OrgUnitGroup = "OUG",
        ProgramDataElement = "D",
        ProgramIndicator = "I",
        ReportingRate = "R",
    }
}

impl DataItemType {
    /// The identifier type of the id group at `index` for a data item with
    /// `size` id groups
    pub const fn id_type(&self, size: usize, index: usize) -> IdType {
        match (self, index) {
            (Self::DataElement, 0) => IdType::DataElementUid,
            (Self::DataElement, 1) => IdType::CategoryOptionComboUid,
            (Self::DataElement, _) => IdType::AttributeOptionComboUid,
            (Self::Attribute, 0) if size > 1 => IdType::ProgramUid,
            (Self::Attribute, _) => IdType::AttributeUid,
            (Self::Constant, _) => IdType::ConstantUid,
            (Self::Indicator, _) => IdType::IndicatorUid,
            (Self::OrgUnitGroup, _) => IdType::OrganisationUnitGroupUid,
            (Self::ProgramDataElement, 0) => IdType::ProgramUid,
            (Self::ProgramDataElement, _) => IdType::DataElementUid,
            (Self::ProgramIndicator, _) => IdType::ProgramIndicatorUid,
            (Self::ReportingRate, 0) => IdType::DataSetUid,
            (Self::ReportingRate, _) => IdType::ReportingRateType,
        }
    }
}

symbol_enum! {
    /// Prefix tags on the first id group of a data item, e.g. `#{deGroup:...}`
    pub enum Tag {
        DeGroup = "deGroup",
        CoGroup = "coGroup",
        PsEventDate = "PS_EVENTDATE",
    }
}

impl Tag {
    /// The identifier type of the ids following the tag
    pub const fn id_type(&self) -> IdType {
        match self {
            Self::DeGroup => IdType::DataElementGroupUid,
            Self::CoGroup => IdType::CategoryOptionGroupUid,
            Self::PsEventDate => IdType::ProgramStageUid,
        }
    }
}

symbol_enum! {
    /// Variable reference forms
    pub enum VariableType {
        /// `V{name}`, a built-in program variable
        Program = "V",
        /// `#{name}`, a program rule variable
        ProgramRule = "#",
        /// `A{name}`, a program rule variable bound to an attribute
        ProgramRuleAttribute = "A",
        /// A quoted program rule variable name given as function argument
        ProgramRuleString = "",
    }
}

impl VariableType {
    pub const fn is_program(&self) -> bool {
        matches!(self, Self::Program)
    }

    pub const fn is_program_rule(&self) -> bool {
        !self.is_program()
    }
}

symbol_enum! {
    pub enum ReportingRateType {
        ReportingRate = "REPORTING_RATE",
        ReportingRateOnTime = "REPORTING_RATE_ON_TIME",
        ActualReports = "ACTUAL_REPORTS",
        ActualReportsOnTime = "ACTUAL_REPORTS_ON_TIME",
        ExpectedReports = "EXPECTED_REPORTS",
    }
}

symbol_enum! {
    /// Built-in program variables, used as `V{name}`
    pub enum ProgramVariable {
        AnalyticsPeriodEnd = "analytics_period_end",
        AnalyticsPeriodStart = "analytics_period_start",
        CreationDate = "creation_date",
        CurrentDate = "current_date",
        CompletedDate = "completed_date",
        DueDate = "due_date",
        EnrollmentCount = "enrollment_count",
        EnrollmentDate = "enrollment_date",
        EnrollmentId = "enrollment_id",
        EnrollmentStatus = "enrollment_status",
        Environment = "environment",
        EventCount = "event_count",
        EventDate = "event_date",
        EventId = "event_id",
        EventStatus = "event_status",
        ExecutionDate = "execution_date",
        IncidentDate = "incident_date",
        OrgUnit = "org_unit",
        OrgUnitCount = "org_unit_count",
        OrgUnitCode = "orgunit_code",
        ProgramName = "program_name",
        ProgramStageId = "program_stage_id",
        ProgramStageName = "program_stage_name",
        ScheduledDate = "scheduled_date",
        SyncDate = "sync_date",
        TeiCount = "tei_count",
        ValueCount = "value_count",
        ZeroPosValueCount = "zero_pos_value_count",
    }
}

symbol_enum! {
    /// Values referenced as `[name]`
    pub enum NamedValue {
        Days = "days",
    }
}

symbol_enum! {
    /// Aggregation types selectable by the `aggregationType` modifier
    pub enum AggregationType {
        Sum = "SUM",
        Average = "AVERAGE",
        AverageSumOrgUnit = "AVERAGE_SUM_ORG_UNIT",
        Last = "LAST",
        LastAverageOrgUnit = "LAST_AVERAGE_ORG_UNIT",
        LastInPeriod = "LAST_IN_PERIOD",
        LastInPeriodAverageOrgUnit = "LAST_IN_PERIOD_AVERAGE_ORG_UNIT",
        First = "FIRST",
        FirstAverageOrgUnit = "FIRST_AVERAGE_ORG_UNIT",
        Count = "COUNT",
        Stddev = "STDDEV",
        Variance = "VARIANCE",
        Min = "MIN",
        Max = "MAX",
        MinSumOrgUnit = "MIN_SUM_ORG_UNIT",
        MaxSumOrgUnit = "MAX_SUM_ORG_UNIT",
        None = "NONE",
        Custom = "CUSTOM",
        Default = "DEFAULT",
    }
}
