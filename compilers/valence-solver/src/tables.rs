//! Tables compiled into the engine. They are parsed and validated when a
//! [`Valence`](crate::Valence) is built.

/// Allowed values per enrichment field. `""` and `NA` are always allowed.
pub const FIELD_SPEC: &str = "
valence
    adjunct
    complement
    core

predication
    NA
    regular
    copula

grammatical
    NA
    subject
    principal_direct_object
    direct_object
    NP_direct_object
    indirect_object
    L_object
    K_object
    infinitive_object
    *

original
    NA
    subject
    principal_direct_object
    direct_object
    NP_direct_object
    indirect_object
    L_object
    K_object
    infinitive_object
    *

lexical
    location
    time

semantic
    benefactive
    time
    location
    instrument
    manner
";

/// Default labels per phrase function:
/// `function, description, valence, predication, grammatical, original, lexical, semantic`.
pub const PHRASE_BASELINE: &str = "\
Adju\tAdjunct\tadjunct\tNA\tNA\t\t\t
Cmpl\tComplement\tcomplement\tNA\t*\t\t\t
Conj\tConjunction\tNA\tNA\tNA\t\tNA\tNA
EPPr\tEnclitic personal pronoun\tNA\tcopula\tNA\t\t\t
ExsS\tExistence with subject suffix\tcore\tcopula\tsubject\t\t\t
Exst\tExistence\tcore\tcopula\tNA\t\t\t
Frnt\tFronted element\tNA\tNA\tNA\t\tNA\tNA
Intj\tInterjection\tNA\tNA\tNA\t\tNA\tNA
IntS\tInterjection with subject suffix\tcore\tNA\tsubject\t\t\t
Loca\tLocative\tadjunct\tNA\tNA\t\tlocation\tlocation
Modi\tModifier\tNA\tNA\tNA\t\tNA\tNA
ModS\tModifier with subject suffix\tcore\tNA\tsubject\t\t\t
NCop\tNegative copula\tcore\tcopula\tNA\t\t\t
NCoS\tNegative copula with subject suffix\tcore\tcopula\tsubject\t\t\t
Nega\tNegation\tNA\tNA\tNA\t\tNA\tNA
Objc\tObject\tcomplement\tNA\tdirect_object\t\t\t
PrAd\tPredicative adjunct\tadjunct\tNA\tNA\t\t\t
PrcS\tPredicate complement with subject suffix\tcore\tregular\tsubject\t\t\t
PreC\tPredicate complement\tcore\tregular\tNA\t\t\t
Pred\tPredicate\tcore\tregular\tNA\t\t\t
PreO\tPredicate with object suffix\tcore\tregular\tdirect_object\t\t\t
PreS\tPredicate with subject suffix\tcore\tregular\tsubject\t\t\t
PtcO\tParticiple with object suffix\tcore\tregular\tdirect_object\t\t\t
Ques\tQuestion\tNA\tNA\tNA\t\tNA\tNA
Rela\tRelative\tNA\tNA\tNA\t\tNA\tNA
Subj\tSubject\tcore\tNA\tsubject\t\t\t
Supp\tSupplementary constituent\tadjunct\tNA\tNA\t\t\tbenefactive
Time\tTime reference\tadjunct\tNA\tNA\t\ttime\ttime
Unkn\tUnknown\tNA\tNA\tNA\t\tNA\tNA
Voct\tVocative\tNA\tNA\tNA\t\tNA\tNA
";

/// Default labels per dependent clause, keyed by `rela` for object clauses and by `typ` otherwise.
pub const CLAUSE_BASELINE: &str = "\
Objc\tObject\tcomplement\tNA\tdirect_object\t\t\t
InfC\tInfinitive Construct clause\tNA\tNA\t\t\t\t
";
