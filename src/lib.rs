pub mod configuration;

pub mod calc {
    pub mod calcerror;
    pub mod tectonicregiontype;
    pub mod intensitymeasure;
    pub mod magdistcutoff;
    pub mod ruptureforecast;
    pub mod groundmotionmodel;
    pub mod hazardcurvecalculator;
    pub mod disaggregationcalculator;
    pub mod collaborators;
    pub mod hazardcurveengine;
    pub mod disaggregationengine;
}

pub mod geo {
    pub mod geoerror;
    pub mod location;
    pub mod griddedregion;
    pub mod griddedgeodataset;
}

pub mod magdist {
    pub mod magfreqdisterror;
    pub mod magnitudegrid;
    pub mod incrementalmagfreqdist;
    pub mod gaussianmagfreqdist;
}

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod interpolate;
    pub mod function {
        pub mod point2d;
        pub mod functionerror;
        pub mod discretizedfunction;
        pub mod arbitrarilydiscretizedfunc;
    }
}

pub mod service {
    pub mod serviceerror;
    pub mod hazardrequest;
    pub mod hazardresponse;
    pub mod hazardservice;
}

pub mod site {
    pub mod site;
}
