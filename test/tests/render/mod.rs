mod forest_tests;
