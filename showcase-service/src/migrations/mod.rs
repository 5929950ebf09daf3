pub mod v1_patent_status;
